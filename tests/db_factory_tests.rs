//! Tests for repository factory and configuration handling.

use studyplan_rust::db::{RepositoryBuilder, RepositoryConfig, RepositoryFactory, RepositoryType};

#[tokio::test]
async fn test_factory_creates_local_repository() {
    let repo = RepositoryFactory::create(RepositoryType::Local, None)
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_builder_explicit_local() {
    let repo = RepositoryBuilder::new()
        .repository_type(RepositoryType::Local)
        .build()
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[test]
fn test_repository_type_parsing() {
    assert_eq!(
        "local".parse::<RepositoryType>().unwrap(),
        RepositoryType::Local
    );
    assert_eq!(
        "POSTGRES".parse::<RepositoryType>().unwrap(),
        RepositoryType::Postgres
    );
    assert!("sqlite".parse::<RepositoryType>().is_err());
}

#[test]
fn test_config_defaults() {
    let toml = r#"
[repository]
type = "local"
"#;
    let config: RepositoryConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.planner.daily_limit_hours, 8.0);
}

#[test]
fn test_config_planner_section() {
    let toml = r#"
[repository]
type = "local"

[planner]
daily_limit_hours = 5.5
"#;
    let config: RepositoryConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.planner.daily_limit_hours, 5.5);
}
