pub mod registrar;
pub mod types;

pub use registrar::Registrar;
pub use types::{RegisterRequest, RegisteredState, RegistrarMode, RegistrarSnapshot};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn req(id: &str, parent: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            id: id.into(),
            structure: "account".into(),
            data: json!({"balance": 0}),
            parent_id: parent.map(|p| p.to_string()),
        }
    }

    #[test]
    fn states_get_contiguous_order_index() {
        let mut registrar = Registrar::new(RegistrarMode::Strict);
        let a = registrar.register(req("a", None)).unwrap();
        let b = registrar.register(req("b", Some("a"))).unwrap();
        assert_eq!(a.order_index, 0);
        assert_eq!(b.order_index, 1);
    }

    #[test]
    fn strict_mode_rejects_unknown_parent() {
        let mut registrar = Registrar::new(RegistrarMode::Strict);
        assert!(registrar.register(req("b", Some("missing"))).is_err());
    }

    #[test]
    fn lenient_mode_allows_unknown_parent() {
        let mut registrar = Registrar::new(RegistrarMode::Lenient);
        assert!(registrar.register(req("b", Some("missing"))).is_ok());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut registrar = Registrar::new(RegistrarMode::Strict);
        registrar.register(req("a", None)).unwrap();
        assert!(registrar.register(req("a", None)).is_err());
    }

    #[test]
    fn snapshot_roundtrip_preserves_order() {
        let mut registrar = Registrar::new(RegistrarMode::Strict);
        registrar.register(req("a", None)).unwrap();
        registrar.register(req("b", Some("a"))).unwrap();
        let snap = registrar.snapshot();
        let restored = Registrar::from_snapshot(snap.clone());
        assert_eq!(restored.snapshot(), snap);
        assert_eq!(restored.states().len(), 2);
    }
}
