use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::commands::menu::Drink;
use crate::error::{PaveraError, Result};
use crate::gemini;
use crate::logger::LoggerState;
use crate::vocab;

/// One aisle of the consolidated list. Category names are chosen by the
/// model (licores, frutas, mezcladores, ...), not fixed here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingCategory {
    pub category_name: String,
    pub items: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub categories: Vec<ShoppingCategory>,
}

fn shopping_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "categories": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "categoryName": { "type": "STRING" },
                        "items": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["categoryName", "items"]
                }
            }
        }
    })
}

fn shopping_prompt(drinks: &[Drink]) -> String {
    let names = drinks
        .iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let ingredients = drinks
        .iter()
        .map(|d| d.ingredients.join(", "))
        .collect::<Vec<_>>()
        .join(" | ");

    format!(
        "Based on the following drinks and ingredients, create a consolidated shopping list in Spanish.\n\
         Group items by category (e.g., Licores, Frutas, Mezcladores, Especias).\n\
         Use \"Cranberry\" instead of \"Arándano\" and \"Maple\" instead of \"Arce\".\n\
         Drinks: {names}\n\
         Ingredients: {ingredients}"
    )
}

/// Parses the shopping response and normalizes every item string.
pub fn parse_shopping_response(text: &str) -> Result<ShoppingList> {
    let mut list: ShoppingList = serde_json::from_str(text).map_err(|e| {
        PaveraError::Generation(format!("shopping response did not match schema: {e}"))
    })?;
    for category in &mut list.categories {
        category.category_name = vocab::normalize(&category.category_name);
        category.items = category.items.iter().map(|i| vocab::normalize(i)).collect();
    }
    Ok(list)
}

/// Consolidates the currently displayed menu into a categorized shopping
/// list. Generation-only: with no credential, an empty menu, or any
/// failure, the staff view gets an empty list — never an error. The staff
/// view owns the in-flight flag that blocks repeated triggers.
#[tauri::command]
pub async fn generate_shopping_list(
    drinks: Vec<Drink>,
    logger: tauri::State<'_, LoggerState>,
) -> Result<ShoppingList> {
    if drinks.is_empty() {
        return Ok(ShoppingList::default());
    }
    let Some(api_key) = gemini::api_key() else {
        logger.log("shopping", "no credential configured, returning empty list").await;
        return Ok(ShoppingList::default());
    };

    let prompt = shopping_prompt(&drinks);
    match gemini::generate_json(&api_key, &prompt, shopping_schema()).await {
        Ok(text) => match parse_shopping_response(&text) {
            Ok(list) => Ok(list),
            Err(e) => {
                logger.log("shopping", &format!("invalid response: {e}")).await;
                Ok(ShoppingList::default())
            }
        },
        Err(e) => {
            logger.log("shopping", &format!("generation failed: {e}")).await;
            Ok(ShoppingList::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_are_normalized() {
        let text = r#"{"categories":[
            {"categoryName":"Frutas","items":["Arándanos frescos","2 Limas"]},
            {"categoryName":"Mezcladores","items":["Sirope de arce"]}
        ]}"#;
        let list = parse_shopping_response(text).expect("valid");
        assert_eq!(list.categories.len(), 2);
        assert_eq!(list.categories[0].items[0], "Cranberrys frescos");
        assert_eq!(list.categories[1].items[0], "Sirope de Maple");
    }

    #[test]
    fn malformed_response_is_an_error() {
        assert!(parse_shopping_response("nope").is_err());
        assert!(parse_shopping_response(r#"{"categories":[{"items":[]}]}"#).is_err());
    }

    #[test]
    fn empty_categories_parse_cleanly() {
        let list = parse_shopping_response(r#"{"categories":[]}"#).expect("valid");
        assert!(list.categories.is_empty());
    }

    #[test]
    fn prompt_mentions_every_drink() {
        let drinks = crate::commands::menu::fallback_menu();
        let prompt = shopping_prompt(&drinks);
        for drink in &drinks {
            assert!(prompt.contains(&drink.name));
        }
        assert!(prompt.contains("2 oz Bourbon"));
    }
}
