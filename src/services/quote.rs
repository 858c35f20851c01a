use std::collections::HashSet;

use crate::errors::AppError;
use crate::models::{Catalog, Quote};

/// Prices a service plus add-ons. Repeated add-on ids are counted once.
pub fn compute_total(
    catalog: &Catalog,
    service_id: &str,
    add_on_ids: &[String],
) -> Result<Quote, AppError> {
    let service = catalog.get_service(service_id)?;

    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    let mut price_cents = service.price_cents;
    let mut duration_minutes = service.duration_minutes;

    for id in add_on_ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        let add_on = catalog.get_add_on(id)?;
        price_cents += add_on.price_cents;
        duration_minutes += add_on.duration_minutes;
        distinct.push(add_on.id.clone());
    }

    Ok(Quote {
        service_id: service.id.clone(),
        add_on_ids: distinct,
        price_cents,
        duration_minutes,
    })
}
