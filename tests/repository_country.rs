mod common;

use common::{canada_box, usa_box};
use is_in_country::domain::entities::{NewCountry, UpdateCountry};
use is_in_country::domain::repositories::CountryRepository;
use is_in_country::error::AppError;
use is_in_country::infrastructure::persistence::PgCountryRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_country(code: &str, name: &str, polygon_data: String) -> NewCountry {
    NewCountry {
        country_code: code.to_string(),
        country_name: name.to_string(),
        polygon_data,
    }
}

#[sqlx::test]
async fn test_create_country(pool: PgPool) {
    let repo = PgCountryRepository::new(Arc::new(pool));

    let country = repo
        .create(new_country("USA", "United States", usa_box()))
        .await
        .unwrap();

    assert!(country.id > 0);
    assert_eq!(country.country_code, "USA");
    assert_eq!(country.country_name, "United States");
    assert_eq!(country.polygon_data, usa_box());
    assert_eq!(country.created_at, country.updated_at);
}

#[sqlx::test]
async fn test_create_duplicate_code(pool: PgPool) {
    let repo = PgCountryRepository::new(Arc::new(pool));

    repo.create(new_country("USA", "United States", usa_box()))
        .await
        .unwrap();
    let result = repo.create(new_country("USA", "Again", usa_box())).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_find_by_code(pool: PgPool) {
    let repo = PgCountryRepository::new(Arc::new(pool));

    repo.create(new_country("CAN", "Canada", canada_box()))
        .await
        .unwrap();

    let found = repo.find_by_code("CAN").await.unwrap().unwrap();
    assert_eq!(found.country_name, "Canada");

    assert!(repo.find_by_code("XYZ").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_list_ordered_by_code(pool: PgPool) {
    let repo = PgCountryRepository::new(Arc::new(pool));

    for (code, name) in [("USA", "United States"), ("CAN", "Canada"), ("MEX", "Mexico")] {
        repo.create(new_country(code, name, usa_box())).await.unwrap();
    }

    let codes: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.country_code)
        .collect();

    assert_eq!(codes, vec!["CAN", "MEX", "USA"]);
}

#[sqlx::test]
async fn test_update_name_only(pool: PgPool) {
    let repo = PgCountryRepository::new(Arc::new(pool));

    let created = repo
        .create(new_country("USA", "United States", usa_box()))
        .await
        .unwrap();

    let updated = repo
        .update(
            "USA",
            UpdateCountry {
                country_name: Some("United States of America".to_string()),
                polygon_data: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.country_name, "United States of America");
    assert_eq!(updated.polygon_data, created.polygon_data);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test]
async fn test_update_boundary_only(pool: PgPool) {
    let repo = PgCountryRepository::new(Arc::new(pool));

    repo.create(new_country("USA", "United States", usa_box()))
        .await
        .unwrap();

    let updated = repo
        .update(
            "USA",
            UpdateCountry {
                country_name: None,
                polygon_data: Some(canada_box()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.country_name, "United States");
    assert_eq!(updated.polygon_data, canada_box());
}

#[sqlx::test]
async fn test_update_missing(pool: PgPool) {
    let repo = PgCountryRepository::new(Arc::new(pool));

    let result = repo
        .update(
            "XYZ",
            UpdateCountry {
                country_name: Some("Nowhere".to_string()),
                polygon_data: None,
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
}

#[sqlx::test]
async fn test_delete_country(pool: PgPool) {
    let repo = PgCountryRepository::new(Arc::new(pool));

    repo.create(new_country("USA", "United States", usa_box()))
        .await
        .unwrap();

    repo.delete("USA").await.unwrap();

    assert!(repo.find_by_code("USA").await.unwrap().is_none());
    assert!(matches!(
        repo.delete("USA").await.unwrap_err(),
        AppError::NotFound { .. }
    ));
}

#[sqlx::test]
async fn test_count(pool: PgPool) {
    let repo = PgCountryRepository::new(Arc::new(pool));

    assert_eq!(repo.count().await.unwrap(), 0);

    repo.create(new_country("USA", "United States", usa_box()))
        .await
        .unwrap();
    repo.create(new_country("CAN", "Canada", canada_box()))
        .await
        .unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_lowercase_code_rejected_by_schema(pool: PgPool) {
    let repo = PgCountryRepository::new(Arc::new(pool));

    let result = repo.create(new_country("usa", "United States", usa_box())).await;

    assert!(result.is_err());
}
