//! Configuration loading tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::test_config;
    use restapi_rs::config::{Config, Policy};
    use restapi_rs::core::keys::KeyStrategy;

    #[tokio::test]
    async fn test_example_config_loads() {
        let config = crate::assert_ok!(Config::from_file("config/restapi.yaml.example").await);

        assert_eq!(config.resources().len(), 3);
        assert_eq!(config.batch().max_requests, 100);
        assert!(config.batch().array_atomic);

        let projects = config
            .resources()
            .iter()
            .find(|r| r.name == "projects")
            .unwrap();
        assert_eq!(projects.key, KeyStrategy::Base64Uuid);
        assert_eq!(projects.policy, Policy::Authenticated);
        assert!(projects.rules.create["org_id"].is_required());
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let config = crate::assert_ok!(Config::load("config/does-not-exist.yaml").await);
        assert!(config.resources().is_empty());
    }

    #[test]
    fn test_fixture_config_is_valid() {
        let config = test_config();
        crate::assert_ok!(config.validate());
        assert_eq!(config.batch_endpoint(), "/api/batch");
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        for yaml in [
            "resources:\n  - name: users\n",
            "resources:\n  - name: batch\n",
            "resources:\n  - name: orgs\n  - name: orgs\n",
            "batch:\n  path: a/b\n",
            "storage:\n  database:\n    url: \"sqlite::memory:\"\n    max_connections: 4\n",
            "auth:\n  token_length: 8\n",
        ] {
            crate::assert_err!(Config::from_yaml(yaml));
        }
    }
}
