use uuid::Uuid;

/// Sequential ID generator for document nodes
///
/// Ids look like `<seed>-<n>`. A random seed per editing session keeps ids
/// unique across documents saved by different sessions.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        let mut seed = Uuid::new_v4().simple().to_string();
        seed.truncate(8);
        Self::from_seed(seed)
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
