//! The category filter a report can be generated for.

/// The eighteen Pokémon types, in the order the selector lists them.
pub const POKEMON_TYPES: [&str; 18] = [
    "normal", "fighting", "flying", "poison", "ground", "rock", "bug", "ghost", "steel", "fire",
    "water", "grass", "electric", "psychic", "ice", "dragon", "dark", "fairy",
];

pub fn default_categories() -> Vec<String> {
    POKEMON_TYPES.iter().map(|t| t.to_string()).collect()
}
