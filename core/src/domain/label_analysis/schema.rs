use serde_json::json;

/// Returns the response schema requested from the label extraction model.
///
/// No field is required: the scoring pipeline copes with any subset.
pub fn get_label_extraction_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "productName": { "type": "string" },
            "servingSize": { "type": "string" },
            "sugarPerServingGrams": { "type": "number" },
            "sugarTeaspoons": { "type": "number" },
            "summary": { "type": "string" },
            "macros": {
                "type": "object",
                "properties": {
                    "carbs": { "type": "number" },
                    "protein": { "type": "number" },
                    "fat": { "type": "number" }
                }
            },
            "nutritionPer100g": {
                "type": "object",
                "properties": {
                    "energyKJ": { "type": "number" },
                    "sugarGrams": { "type": "number" },
                    "satFatGrams": { "type": "number" },
                    "sodiumMg": { "type": "number" },
                    "fiberGrams": { "type": "number" },
                    "proteinGrams": { "type": "number" },
                    "fruitVegPercent": { "type": "number" }
                }
            },
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "originalName": { "type": "string" },
                        "translatedName": { "type": "string" },
                        "description": { "type": "string" },
                        "riskLevel": {
                            "type": "string",
                            "enum": ["safe", "caution", "avoid"]
                        },
                        "bannedIn": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    }
                }
            },
            "claims": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "claim": { "type": "string" },
                        "reality": { "type": "string" },
                        "verdict": {
                            "type": "string",
                            "enum": ["verified", "misleading", "unknown"]
                        }
                    }
                }
            }
        }
    })
}
