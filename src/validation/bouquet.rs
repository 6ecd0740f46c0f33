use serde_json::Value;

use super::{as_object, nullable_string, numeric, required, string, ValidationErrors};

const NAME_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, PartialEq)]
pub struct NewBouquet {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
}

/// Fields to overwrite on update. The nested options of `description` and
/// `image` separate "leave alone" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BouquetChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub image: Option<Option<String>>,
}

impl BouquetChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
    }
}

pub fn new_bouquet(body: &Value) -> Result<NewBouquet, ValidationErrors> {
    let body = as_object(body)?;
    let mut errors = ValidationErrors::default();

    let name = required(body, "name", &mut errors)
        .and_then(|v| string("name", v, Some(NAME_MAX_CHARS), &mut errors));
    let description = nullable_string(body, "description", &mut errors);
    let price = required(body, "price", &mut errors).and_then(|v| numeric("price", v, &mut errors));
    let image = nullable_string(body, "image", &mut errors);

    errors.finish(|| NewBouquet {
        name: name.unwrap_or_default(),
        description: description.flatten(),
        price: price.unwrap_or_default(),
        image: image.flatten(),
    })
}

/// Same per-field rules as [`new_bouquet`], applied only to the fields present.
pub fn bouquet_changes(body: &Value) -> Result<BouquetChanges, ValidationErrors> {
    let body = as_object(body)?;
    let mut errors = ValidationErrors::default();

    let name = body.get("name").and_then(|v| {
        if v.is_null() {
            errors.add("name", "The name field must not be null.");
            return None;
        }
        if super::is_blank(v) {
            errors.add("name", "The name field must not be empty.");
            return None;
        }
        string("name", v, Some(NAME_MAX_CHARS), &mut errors)
    });
    let price = body.get("price").and_then(|v| {
        if v.is_null() {
            errors.add("price", "The price field must not be null.");
            return None;
        }
        numeric("price", v, &mut errors)
    });
    let description = nullable_string(body, "description", &mut errors);
    let image = nullable_string(body, "image", &mut errors);

    errors.finish(|| BouquetChanges {
        name,
        description,
        price,
        image,
    })
}
