// Built-in resource catalog
// Schemas and seed data for the hotels, pokemon, products, drinks and budget resources

use serde_json::{json, Value};

use super::record::Fields;
use super::schema::{FieldKind, FieldSpec, ResourceSchema};

/// A resource definition together with the records it starts with
pub struct CatalogEntry {
    pub schema: ResourceSchema,
    pub seed: Vec<Fields>,
}

/// All resources the server knows how to serve
pub fn catalog() -> Vec<CatalogEntry> {
    vec![hotels(), pokemon(), products(), drinks(), budget()]
}

/// Look up one catalog entry by resource name
pub fn find(name: &str) -> Option<CatalogEntry> {
    catalog().into_iter().find(|e| e.schema.name == name)
}

fn objects(values: Value) -> Vec<Fields> {
    match values {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn hotels() -> CatalogEntry {
    CatalogEntry {
        schema: ResourceSchema {
            name: "hotels",
            title: "Hotels",
            fields: vec![
                FieldSpec::required("name", FieldKind::String),
                FieldSpec::optional("location", FieldKind::String),
                FieldSpec::optional("rating", FieldKind::Number).with_max(5.0),
                FieldSpec::optional("vacancies", FieldKind::Boolean),
                FieldSpec::optional("rooms", FieldKind::Array),
                FieldSpec::optional("tags", FieldKind::Array),
            ],
            timestamps: true,
        },
        seed: objects(json!([
            {
                "name": "Hotel Cinque Terre",
                "location": "Vernazza, Italy",
                "rating": 4.5,
                "vacancies": true,
                "rooms": [
                    {"roomNumber": 1, "size": "Queen Double", "price": 100, "booked": false},
                    {"roomNumber": 2, "size": "Double Double", "price": 200, "booked": true}
                ],
                "tags": ["beach", "hiking"]
            },
            {
                "name": "The Great Northern",
                "location": "Snoqualmie, Washington",
                "rating": 4.2,
                "vacancies": false,
                "rooms": [
                    {"roomNumber": 315, "size": "King", "price": 250, "booked": true}
                ],
                "tags": ["forest", "pie"]
            }
        ])),
    }
}

fn pokemon() -> CatalogEntry {
    CatalogEntry {
        schema: ResourceSchema {
            name: "pokemon",
            title: "Pokedex",
            fields: vec![
                FieldSpec::required("name", FieldKind::String),
                FieldSpec::optional("img", FieldKind::String),
                FieldSpec::optional("type", FieldKind::Array),
                FieldSpec::optional("stats", FieldKind::Any),
            ],
            timestamps: false,
        },
        seed: objects(json!([
            {
                "name": "Bulbasaur",
                "img": "http://img.pokemondb.net/artwork/bulbasaur.jpg",
                "type": ["Grass", "Poison"],
                "stats": {"hp": 45, "attack": 49, "defense": 49}
            },
            {
                "name": "Ivysaur",
                "img": "http://img.pokemondb.net/artwork/ivysaur.jpg",
                "type": ["Grass", "Poison"],
                "stats": {"hp": 60, "attack": 62, "defense": 63}
            },
            {
                "name": "Venusaur",
                "img": "http://img.pokemondb.net/artwork/venusaur.jpg",
                "type": ["Grass", "Poison"],
                "stats": {"hp": 80, "attack": 82, "defense": 83}
            },
            {
                "name": "Charmander",
                "img": "http://img.pokemondb.net/artwork/charmander.jpg",
                "type": ["Fire"],
                "stats": {"hp": 39, "attack": 52, "defense": 43}
            }
        ])),
    }
}

fn products() -> CatalogEntry {
    CatalogEntry {
        schema: ResourceSchema {
            name: "products",
            title: "Products",
            fields: vec![
                FieldSpec::required("name", FieldKind::String),
                FieldSpec::optional("description", FieldKind::String),
                FieldSpec::optional("img", FieldKind::String),
                FieldSpec::optional("price", FieldKind::Number),
                FieldSpec::optional("qty", FieldKind::Number),
            ],
            timestamps: false,
        },
        seed: objects(json!([
            {
                "name": "Beans",
                "description": "A small pile of beans. Buy more beans for a big pile of beans.",
                "img": "https://imgur.com/LEHS8h3.png",
                "price": 5,
                "qty": 99
            },
            {
                "name": "Bones",
                "description": "It's just a bag of bones.",
                "img": "https://imgur.com/dalOqwk.png",
                "price": 25,
                "qty": 0
            }
        ])),
    }
}

fn drinks() -> CatalogEntry {
    CatalogEntry {
        schema: ResourceSchema {
            name: "drinks",
            title: "Drinks",
            fields: vec![
                FieldSpec::required("name", FieldKind::String),
                FieldSpec::optional("price", FieldKind::Number),
                FieldSpec::optional("image", FieldKind::String),
            ],
            timestamps: false,
        },
        seed: objects(json!([
            {"name": "cappuccino", "price": 3, "image": "/images/cappuccino.png"},
            {"name": "espresso", "price": 2, "image": "/images/espresso.png"},
            {"name": "mocha", "price": 4, "image": "/images/mocha.png"}
        ])),
    }
}

fn budget() -> CatalogEntry {
    CatalogEntry {
        schema: ResourceSchema {
            name: "budget",
            title: "Budgtr",
            fields: vec![
                FieldSpec::required("name", FieldKind::String),
                FieldSpec::required("amount", FieldKind::Number),
                FieldSpec::optional("date", FieldKind::String),
                FieldSpec::optional("from", FieldKind::String),
                FieldSpec::optional("tags", FieldKind::Array),
            ],
            timestamps: false,
        },
        seed: objects(json!([
            {"date": "2024-01-01", "name": "Income", "from": "job", "amount": 1000, "tags": ["income"]},
            {"date": "2024-01-02", "name": "Rent", "from": "landlord", "amount": -500, "tags": ["bills"]}
        ])),
    }
}
