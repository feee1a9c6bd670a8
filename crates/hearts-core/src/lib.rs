#![deny(warnings)]
pub mod belief;
pub mod model;
pub mod rules;
pub mod score;
pub mod wire;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "mchearts"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "mchearts");
        assert!(!AppInfo::version().is_empty());
    }
}
