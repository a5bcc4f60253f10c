use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tauri::ipc::Channel;

use crate::error::{PaveraError, Result};
use crate::gemini;
use crate::logger::LoggerState;
use crate::store::Store;
use crate::vocab;

// ── Model ───────────────────────────────────────────────────────────────────

/// The two drink categories. Closed set — the menu never grows new kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrinkType {
    Cocktail,
    Mocktail,
}

/// One menu entry. Immutable once displayed; a new menu replaces the whole
/// set, never individual fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drink {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(rename = "type")]
    pub drink_type: DrinkType,
    pub emoji: String,
}

#[derive(Deserialize)]
struct MenuResponse {
    drinks: Vec<Drink>,
}

/// Progress events streamed to the frontend while the menu loads.
/// The first event always carries a complete, valid menu, so the guest
/// never waits on the network to see drinks.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "event", content = "data")]
pub enum MenuEvent {
    #[serde(rename_all = "camelCase")]
    MenuReady {
        drinks: Vec<Drink>,
        source: MenuSource,
    },
}

#[derive(Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuSource {
    Cache,
    Fallback,
    Generated,
}

// ── Static catalog ──────────────────────────────────────────────────────────

struct CatalogEntry {
    name: &'static str,
    description: &'static str,
    ingredients: &'static [&'static str],
    instructions: &'static str,
    drink_type: DrinkType,
    emoji: &'static str,
}

/// Hand-curated fall menu: 4 cocktails + 4 mocktails, quantities on every
/// ingredient, numbered steps. This is the guaranteed baseline — it never
/// touches the generation pipeline.
const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Manzana Mágica",
        description: "Bourbon con sidra de manzana y un toque de canela.",
        ingredients: &[
            "2 oz Bourbon",
            "4 oz Sidra de Manzana (Apple Cider)",
            "0.5 oz Jugo de Limón",
            "1 Pizca de Canela",
        ],
        instructions: "1. Llenar vaso con hielo. 2. Agregar Bourbon y jugo de limón. 3. Rellenar con Sidra. 4. Espolvorear canela y mezclar suavemente.",
        drink_type: DrinkType::Cocktail,
        emoji: "🍎",
    },
    CatalogEntry {
        name: "Cranberry Embrujado",
        description: "Vodka con jugo de cranberry y lima refrescante.",
        ingredients: &[
            "2 oz Vodka",
            "3 oz Jugo de Cranberry",
            "0.5 oz Jugo de Lima Fresco",
            "2 oz de Agua con Gas (Top)",
        ],
        instructions: "1. Llenar vaso alto con hielo. 2. Agregar Vodka, Cranberry y Lima. 3. Rellenar con agua con gas. 4. Decorar con rodaja de lima.",
        drink_type: DrinkType::Cocktail,
        emoji: "🍒",
    },
    CatalogEntry {
        name: "Margarita Picante",
        description: "Tequila con lima fresca y un toque de jalapeño.",
        ingredients: &[
            "2 oz Tequila Blanco",
            "1 oz Jugo de Lima Fresco",
            "0.75 oz Jarabe Simple (Agave)",
            "2-3 Rodajas de Jalapeño fresco",
        ],
        instructions: "1. Macerar suavemente 1 rodaja de jalapeño en el shaker. 2. Agregar hielo, Tequila, Lima y Jarabe. 3. Agitar vigorosamente. 4. Colar sobre hielo nuevo en vaso con borde de sal.",
        drink_type: DrinkType::Cocktail,
        emoji: "🌶️",
    },
    CatalogEntry {
        name: "Tequila Maple",
        description: "Tequila reposado con notas de maple y naranja.",
        ingredients: &[
            "2 oz Tequila Reposado",
            "0.5 oz Sirope de Maple",
            "2 toques de Amargo de Angostura",
            "1 Cascara de Naranja (Garnish)",
        ],
        instructions: "1. En un vaso corto con hielo grande, agregar Tequila, Maple y Amargos. 2. Remover con cuchara por 20 segundos hasta enfriar. 3. Exprimir aceites de la cáscara de naranja encima.",
        drink_type: DrinkType::Cocktail,
        emoji: "🍁",
    },
    CatalogEntry {
        name: "Sidra Espumosa (Sin Alcohol)",
        description: "Refrescante mezcla de manzana y jengibre.",
        ingredients: &[
            "4 oz Sidra de Manzana",
            "2 oz Ginger Beer",
            "1 Rodaja de Manzana",
        ],
        instructions: "1. Servir hielo en vaso alto. 2. Agregar Sidra y Ginger Beer. 3. Mezclar suavemente.",
        drink_type: DrinkType::Mocktail,
        emoji: "🍏",
    },
    CatalogEntry {
        name: "Cranberry Fizz (Sin Alcohol)",
        description: "Burbujeante y festivo con romero.",
        ingredients: &[
            "3 oz Jugo de Cranberry",
            "3 oz Sprite o 7-Up",
            "1 Ramita de Romero",
            "1 Chorro de Lima",
        ],
        instructions: "1. Llenar vaso con hielo. 2. Servir jugo y refresco. 3. Exprimir lima y decorar con romero.",
        drink_type: DrinkType::Mocktail,
        emoji: "🌿",
    },
    CatalogEntry {
        name: "Mula de Otoño (Sin Alcohol)",
        description: "Versión sin alcohol del Moscow Mule con sabor a otoño.",
        ingredients: &[
            "4 oz Ginger Beer",
            "1 oz Jugo de Pera (o Néctar)",
            "0.5 oz Jugo de Lima",
            "1 Canela en rama",
        ],
        instructions: "1. Llenar taza de cobre o vaso con hielo. 2. Agregar ingredientes y mezclar. 3. Decorar con canela.",
        drink_type: DrinkType::Mocktail,
        emoji: "🍐",
    },
    CatalogEntry {
        name: "Naranja Maple (Sin Alcohol)",
        description: "Cítrico dulce y sofisticado.",
        ingredients: &[
            "3 oz Jugo de Naranja Recién Exprimido",
            "0.5 oz Sirope de Maple",
            "2 oz de Agua con Gas (Top)",
            "1 Cereza Maraschino",
        ],
        instructions: "1. Agitar jugo y maple con hielo en shaker para enfriar. 2. Servir en copa y rellenar con agua con gas.",
        drink_type: DrinkType::Mocktail,
        emoji: "🍊",
    },
];

/// Returns the static catalog as a fresh menu. Constant data, no failure
/// mode — whenever generation is unavailable or invalid, this is what the
/// guests see.
pub fn fallback_menu() -> Vec<Drink> {
    CATALOG
        .iter()
        .map(|entry| Drink {
            name: entry.name.to_string(),
            description: entry.description.to_string(),
            ingredients: entry.ingredients.iter().map(|i| (*i).to_string()).collect(),
            instructions: entry.instructions.to_string(),
            drink_type: entry.drink_type,
            emoji: entry.emoji.to_string(),
        })
        .collect()
}

// ── Generation ──────────────────────────────────────────────────────────────

const MENU_PROMPT: &str = r#"
Generate a Thanksgiving/Fall themed drink menu in Spanish.

IMPORTANT VOCABULARY RULES:
1. NEVER use the word "Arándano". ALWAYS use "Cranberry".
2. NEVER use the word "Arce". ALWAYS use "Maple".

IMPORTANT INGREDIENT RULES:
1. Use ONLY simple, easy-to-find ingredients available at a standard supermarket.
2. **CRITICAL:** INGREDIENTS MUST HAVE SPECIFIC MEASUREMENTS (e.g., "2 oz", "1/2 oz", "Top with"). Do not list just the name.
3. ABSOLUTELY NO PUMPKIN (CALABAZA) or PUMPKIN PUREE.

I need exactly 4 Cocktails (alcohol) with the following specific requirements:
1. Bourbon Cocktail: Named "Manzana Mágica". Ingredients: Bourbon, Apple Cider, Lemon, Cinnamon.
2. Vodka Cocktail: Named "Cranberry Embrujado". Ingredients: Vodka, Cranberry Juice, Lime, Soda.
3. Tequila Cocktail: Named "Margarita Picante". Traditional Spicy Margarita (Tequila, Lime, Agave, Jalapeño).
4. Tequila Cocktail: Fall themed (e.g. Maple Old Fashioned style).

I need exactly 4 Mocktails (non-alcoholic) with fall themes using simple ingredients.
IMPORTANT MOCKTAIL RULES:
1. Ingredients must be ready-to-use from a supermarket (e.g., Ginger Beer, Apple Cider, Sparkling Water, Cranberry Juice, Orange Juice, Sprite/7-Up).
2. NO preparation required (no muddling, no homemade syrups, no cooking).
3. Use simple sweeteners like Maple Syrup or Honey if needed.

**INSTRUCTIONS REQUIREMENT:**
The instructions must be practical, step-by-step for a bartender. Example: "1. Add ice. 2. Pour 2oz Vodka. 3. Shake."

The descriptions should be elegant and sophisticated.
Assign a relevant emoji to each drink.
"#;

/// Structured-output schema for the menu call: an object with a `drinks`
/// array whose entries carry six required fields.
fn menu_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "drinks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING", "description": "Short, elegant description in Spanish" },
                        "ingredients": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "List of ingredients WITH AMOUNTS (e.g., '2 oz Bourbon')" },
                        "instructions": { "type": "STRING", "description": "Numbered step-by-step mixing instructions for the bartender." },
                        "type": { "type": "STRING", "enum": ["Cocktail", "Mocktail"] },
                        "emoji": { "type": "STRING" }
                    },
                    "required": ["name", "description", "ingredients", "instructions", "type", "emoji"]
                }
            }
        }
    })
}

/// Parses and validates a generation response. The whole response is
/// rejected if any drink is missing a field or carries empty text — a menu
/// is replaced wholesale or not at all.
pub fn parse_menu_response(text: &str) -> Result<Vec<Drink>> {
    let parsed: MenuResponse = serde_json::from_str(text)
        .map_err(|e| PaveraError::Generation(format!("menu response did not match schema: {e}")))?;

    if parsed.drinks.is_empty() {
        return Err(PaveraError::Generation("menu response had no drinks".into()));
    }

    for drink in &parsed.drinks {
        let texts_ok = !drink.name.trim().is_empty()
            && !drink.description.trim().is_empty()
            && !drink.instructions.trim().is_empty()
            && !drink.emoji.trim().is_empty();
        let ingredients_ok = !drink.ingredients.is_empty()
            && drink.ingredients.iter().all(|i| !i.trim().is_empty());
        if !texts_ok || !ingredients_ok {
            return Err(PaveraError::Generation(format!(
                "drink {:?} has empty fields",
                drink.name
            )));
        }
    }

    Ok(parsed.drinks.into_iter().map(normalize_drink).collect())
}

/// Runs the normalizer over every free-text field. Category and emoji are
/// structural and pass through untouched.
fn normalize_drink(drink: Drink) -> Drink {
    Drink {
        name: vocab::normalize(&drink.name),
        description: vocab::normalize(&drink.description),
        ingredients: drink.ingredients.iter().map(|i| vocab::normalize(i)).collect(),
        instructions: vocab::normalize(&drink.instructions),
        drink_type: drink.drink_type,
        emoji: drink.emoji,
    }
}

// ── Command ─────────────────────────────────────────────────────────────────

/// Loads the menu for this session, streaming results over the channel.
///
/// Order of events:
/// 1. A cached snapshot under the current version wins outright.
/// 2. Otherwise the static catalog is emitted immediately, so something
///    valid is on screen before any network latency.
/// 3. With a credential configured, one generation attempt follows; a valid
///    result is emitted as a silent swap and persisted. Every failure mode
///    leaves the catalog in place and is only logged.
#[tauri::command]
pub async fn load_menu(
    on_event: Channel<MenuEvent>,
    store: tauri::State<'_, Store>,
    logger: tauri::State<'_, LoggerState>,
) -> Result<()> {
    if let Some(drinks) = store.load_menu_cache() {
        logger.log("menu", "serving cached menu snapshot").await;
        on_event
            .send(MenuEvent::MenuReady {
                drinks,
                source: MenuSource::Cache,
            })
            .map_err(|e| PaveraError::Custom(e.to_string()))?;
        return Ok(());
    }

    on_event
        .send(MenuEvent::MenuReady {
            drinks: fallback_menu(),
            source: MenuSource::Fallback,
        })
        .map_err(|e| PaveraError::Custom(e.to_string()))?;

    let Some(api_key) = gemini::api_key() else {
        logger.log("menu", "no credential configured, static menu is final").await;
        return Ok(());
    };

    // One attempt only — no retry, no merge of partial results.
    match generate_menu(&api_key).await {
        Ok(drinks) => {
            if let Err(e) = store.save_menu_cache(&drinks) {
                logger.log("menu", &format!("failed to persist snapshot: {e}")).await;
            }
            logger.log("menu", &format!("generated menu with {} drinks", drinks.len())).await;
            on_event
                .send(MenuEvent::MenuReady {
                    drinks,
                    source: MenuSource::Generated,
                })
                .map_err(|e| PaveraError::Custom(e.to_string()))?;
        }
        Err(e) => {
            logger.log("menu", &format!("generation failed, keeping static menu: {e}")).await;
        }
    }

    Ok(())
}

async fn generate_menu(api_key: &str) -> Result<Vec<Drink>> {
    let text = gemini::generate_json(api_key, MENU_PROMPT, menu_schema()).await?;
    parse_menu_response(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_menu_covers_both_categories() {
        let menu = fallback_menu();
        assert!(!menu.is_empty());
        assert!(menu.iter().any(|d| d.drink_type == DrinkType::Cocktail));
        assert!(menu.iter().any(|d| d.drink_type == DrinkType::Mocktail));
    }

    #[test]
    fn fallback_ingredients_carry_quantities() {
        for drink in fallback_menu() {
            assert!(!drink.ingredients.is_empty(), "{} has no ingredients", drink.name);
            for ingredient in &drink.ingredients {
                assert!(
                    ingredient.chars().any(|c| c.is_ascii_digit()),
                    "{}: ingredient {ingredient:?} has no quantity token",
                    drink.name
                );
            }
        }
    }

    #[test]
    fn fallback_instructions_are_numbered_steps() {
        for drink in fallback_menu() {
            assert!(drink.instructions.starts_with("1."), "{}", drink.name);
        }
    }

    #[test]
    fn empty_drink_array_is_rejected() {
        assert!(parse_menu_response(r#"{"drinks":[]}"#).is_err());
    }

    #[test]
    fn missing_field_rejects_whole_response() {
        // Second drink lacks "instructions" — nothing from the response
        // may be used.
        let text = r#"{"drinks":[
            {"name":"A","description":"d","ingredients":["1 oz X"],"instructions":"1. Mix.","type":"Cocktail","emoji":"🍸"},
            {"name":"B","description":"d","ingredients":["1 oz Y"],"type":"Mocktail","emoji":"🍹"}
        ]}"#;
        assert!(parse_menu_response(text).is_err());
    }

    #[test]
    fn blank_fields_reject_whole_response() {
        let text = r#"{"drinks":[
            {"name":"  ","description":"d","ingredients":["1 oz X"],"instructions":"1. Mix.","type":"Cocktail","emoji":"🍸"}
        ]}"#;
        assert!(parse_menu_response(text).is_err());
    }

    #[test]
    fn valid_response_is_normalized() {
        let text = r#"{"drinks":[
            {"name":"Spritz de Arándano","description":"con sirope de arce","ingredients":["2 oz Jugo de Arándano"],"instructions":"1. Mezclar arándano y servir.","type":"Mocktail","emoji":"🍒"}
        ]}"#;
        let drinks = parse_menu_response(text).expect("valid response");
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].name, "Spritz de Cranberry");
        assert_eq!(drinks[0].description, "con sirope de Maple");
        assert_eq!(drinks[0].ingredients[0], "2 oz Jugo de Cranberry");
        assert_eq!(drinks[0].instructions, "1. Mezclar Cranberry y servir.");
        assert_eq!(drinks[0].drink_type, DrinkType::Mocktail);
    }

    #[test]
    fn garbage_text_is_rejected() {
        assert!(parse_menu_response("not json at all").is_err());
        assert!(parse_menu_response("").is_err());
    }
}
