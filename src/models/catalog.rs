use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

static DEFAULT_CATALOG: &str = include_str!("../../data/catalog.json");

/// $100,000; keeps every quote total far inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 10_000_000;
/// One working day per catalog entry.
pub const MAX_DURATION_MINUTES: i32 = 24 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServicePackage {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddOn {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub rating: u8,
    pub comment: String,
    pub service: String,
    pub date: String,
    pub location: Option<String>,
}

/// What kind of catalog entry a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Service,
    AddOn,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Service => "service",
            CatalogKind::AddOn => "add-on",
        }
    }
}

/// Immutable set of everything the business sells, loaded once at start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    services: Vec<ServicePackage>,
    add_ons: Vec<AddOn>,
    #[serde(default)]
    testimonials: Vec<Testimonial>,
}

impl Catalog {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let catalog: Catalog = serde_json::from_str(s)?;

        let mut seen = HashSet::new();
        for service in &catalog.services {
            anyhow::ensure!(seen.insert(service.id.as_str()), "duplicate service id: {}", service.id);
            check_price(&service.id, service.price_cents)?;
            check_duration(&service.id, service.duration_minutes)?;
        }

        let mut seen = HashSet::new();
        for add_on in &catalog.add_ons {
            anyhow::ensure!(seen.insert(add_on.id.as_str()), "duplicate add-on id: {}", add_on.id);
            check_price(&add_on.id, add_on.price_cents)?;
            check_duration(&add_on.id, add_on.duration_minutes)?;
        }

        for testimonial in &catalog.testimonials {
            anyhow::ensure!(
                (1..=5).contains(&testimonial.rating),
                "testimonial {} has rating {} outside 1..=5",
                testimonial.id,
                testimonial.rating
            );
        }

        Ok(catalog)
    }

    /// The catalog bundled with the binary.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(DEFAULT_CATALOG)
    }

    pub fn services(&self) -> &[ServicePackage] {
        &self.services
    }

    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn get_service(&self, id: &str) -> Result<&ServicePackage, AppError> {
        self.services
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::UnknownReference {
                kind: CatalogKind::Service,
                id: id.to_string(),
            })
    }

    pub fn get_add_on(&self, id: &str) -> Result<&AddOn, AppError> {
        self.add_ons
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::UnknownReference {
                kind: CatalogKind::AddOn,
                id: id.to_string(),
            })
    }
}

fn check_price(id: &str, price_cents: i64) -> anyhow::Result<()> {
    if price_cents < 0 {
        return Err(anyhow::anyhow!("negative price for {id}: {price_cents}"));
    }
    if price_cents > MAX_PRICE_CENTS {
        return Err(anyhow::anyhow!(
            "price for {id} exceeds {MAX_PRICE_CENTS} cents: {price_cents}"
        ));
    }
    Ok(())
}

fn check_duration(id: &str, minutes: i32) -> anyhow::Result<()> {
    if minutes <= 0 {
        return Err(anyhow::anyhow!("duration for {id} must be positive, got {minutes}"));
    }
    if minutes > MAX_DURATION_MINUTES {
        return Err(anyhow::anyhow!(
            "duration for {id} exceeds {MAX_DURATION_MINUTES} minutes: {minutes}"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        let ids: Vec<&str> = catalog.services().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["basic", "deluxe", "premium"]);
        assert_eq!(catalog.add_ons().len(), 5);
        assert_eq!(catalog.testimonials().len(), 6);
    }

    #[test]
    fn test_get_service() {
        let catalog = Catalog::builtin().unwrap();
        let deluxe = catalog.get_service("deluxe").unwrap();
        assert_eq!(deluxe.price_cents, 6500);
        assert_eq!(deluxe.duration_minutes, 120);
    }

    #[test]
    fn test_get_unknown_add_on() {
        let catalog = Catalog::builtin().unwrap();
        let err = catalog.get_add_on("undercoating").unwrap_err();
        assert!(matches!(
            err,
            AppError::UnknownReference { kind: CatalogKind::AddOn, ref id } if id == "undercoating"
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(Catalog::from_json("not json").is_err());
    }

    #[test]
    fn test_duplicate_service_id_rejected() {
        let json = r#"{"services":[
            {"id":"a","name":"A","description":"","price_cents":100,"duration_minutes":10,"features":[]},
            {"id":"a","name":"B","description":"","price_cents":100,"duration_minutes":10,"features":[]}
        ],"add_ons":[]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"{"services":[],"add_ons":[
            {"id":"x","name":"X","description":"","price_cents":-5,"duration_minutes":10}
        ]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let json = r#"{"services":[
            {"id":"a","name":"A","description":"","price_cents":100,"duration_minutes":0,"features":[]}
        ],"add_ons":[]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_oversized_price_rejected() {
        let json = r#"{"services":[
            {"id":"s","name":"S","description":"","price_cents":9223372036854775000,"duration_minutes":60,"features":[]}
        ],"add_ons":[
            {"id":"a","name":"A","description":"","price_cents":1000,"duration_minutes":10}
        ]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_oversized_duration_rejected() {
        let json = r#"{"services":[],"add_ons":[
            {"id":"a","name":"A","description":"","price_cents":1000,"duration_minutes":2147483647}
        ]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_price_at_limit_accepted() {
        let json = format!(
            r#"{{"services":[
                {{"id":"s","name":"S","description":"","price_cents":{MAX_PRICE_CENTS},"duration_minutes":{MAX_DURATION_MINUTES},"features":[]}}
            ],"add_ons":[]}}"#
        );
        assert!(Catalog::from_json(&json).is_ok());
    }

    #[test]
    fn test_bad_rating_rejected() {
        let json = r#"{"services":[],"add_ons":[],"testimonials":[
            {"id":"1","name":"A","rating":6,"comment":"","service":"","date":"2024-01-01","location":null}
        ]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_testimonials_optional() {
        let catalog = Catalog::from_json(r#"{"services":[],"add_ons":[]}"#).unwrap();
        assert!(catalog.testimonials().is_empty());
    }
}
