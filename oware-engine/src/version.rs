/// The version of the engine (not the crate version).
pub struct EngineVersion {
    pub version: usize,
    pub name: &'static str,
}

impl EngineVersion {
    pub const CURRENT: EngineVersion = EngineVersion { version: 1, name: "abapa" };
}

impl std::fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "oware.{:03}-{}", self.version, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        assert_eq!(EngineVersion::CURRENT.to_string(), "oware.001-abapa");
    }
}
