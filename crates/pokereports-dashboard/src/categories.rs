use pokereports_client::BoxFuture;
use pokereports_core::categories::default_categories;

/// Supplies the selectable category filters. Read once at mount.
pub trait CategorySource: Send + Sync {
    fn categories(&self) -> BoxFuture<'_, Result<Vec<String>, String>>;
}

/// A fixed list, from config or the built-in Pokémon types.
#[derive(Debug, Clone)]
pub struct StaticCategories(Vec<String>);

impl StaticCategories {
    pub fn new(categories: Vec<String>) -> Self {
        Self(categories)
    }
}

impl Default for StaticCategories {
    fn default() -> Self {
        Self(default_categories())
    }
}

impl CategorySource for StaticCategories {
    fn categories(&self) -> BoxFuture<'_, Result<Vec<String>, String>> {
        Box::pin(async { Ok(self.0.clone()) })
    }
}
