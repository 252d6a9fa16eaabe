//! Stack identifiers
//!
//! Every label a rule can contribute to a manifest's `stack` string is a
//! [`StackId`]. Built-in stacks are enum variants; rules defined at runtime
//! use [`StackId::Custom`].

mod id_enum_macro;

crate::define_stack_id! {
    /// Stack label produced by the resolver
    StackId {
        Django => "django" : "Python/Django",
        Flask => "flask" : "Python/Flask",
        FastApi => "fastapi" : "Python/FastAPI",
        React => "react" : "JavaScript/React",
        Vue => "vue" : "JavaScript/Vue",
        Node => "node" : "JavaScript/Node",
        Unknown => "unknown" : "Unknown",
    }
}

impl StackId {
    /// True for the placeholder label used when no rule produced one
    pub fn is_unknown(&self) -> bool {
        matches!(self, StackId::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_id_labels() {
        assert_eq!(StackId::FastApi.label(), "Python/FastAPI");
        assert_eq!(StackId::React.label(), "JavaScript/React");
        assert_eq!(StackId::Node.to_string(), "JavaScript/Node");
        assert_eq!(StackId::Unknown.label(), "Unknown");
    }

    #[test]
    fn test_stack_id_serialization() {
        assert_eq!(
            serde_json::to_string(&StackId::FastApi).unwrap(),
            "\"fastapi\""
        );
        assert_eq!(
            serde_json::to_string(&StackId::Custom("Rust/Axum".to_string())).unwrap(),
            "\"Rust/Axum\""
        );
    }

    #[test]
    fn test_stack_id_deserialization_accepts_key_or_label() {
        let by_key: StackId = serde_json::from_str("\"vue\"").unwrap();
        let by_label: StackId = serde_json::from_str("\"JavaScript/Vue\"").unwrap();
        assert_eq!(by_key, StackId::Vue);
        assert_eq!(by_label, StackId::Vue);

        let custom: StackId = serde_json::from_str("\"Go/Gin\"").unwrap();
        assert_eq!(custom, StackId::Custom("Go/Gin".to_string()));
        assert_eq!(custom.label(), "Go/Gin");
    }

    #[test]
    fn test_all_variants_exclude_custom() {
        assert_eq!(StackId::all_variants().len(), 7);
        assert!(StackId::all_variants()
            .iter()
            .all(|id| !matches!(id, StackId::Custom(_))));
    }

    #[test]
    fn test_is_unknown() {
        assert!(StackId::Unknown.is_unknown());
        assert!(!StackId::Django.is_unknown());
    }
}
