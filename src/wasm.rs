// WebAssembly bindings for the quantity calculator
use crate::calc;
use crate::config::Config;
use crate::quantity::Quantity;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct EunitsWasm {}

impl Default for EunitsWasm {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl EunitsWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {}
    }

    /// Evaluate an expression such as "2 m * 3 s^-1"
    /// When `to_base` is set the result is normalized with the registry from `config_content`
    /// Returns JSON string of the resulting quantity
    #[wasm_bindgen]
    pub fn evaluate(
        &self,
        expression: &str,
        to_base: bool,
        config_content: Option<String>,
    ) -> Result<String, JsValue> {
        let mut result = calc::evaluate(expression)
            .map_err(|e| JsValue::from_str(&format!("Failed to evaluate expression: {}", e)))?;

        if to_base {
            let config = match config_content {
                Some(content) => Config::load_from_str(&content)
                    .map_err(|e| JsValue::from_str(&format!("Failed to load config: {}", e)))?,
                None => Config::empty(),
            };
            let registry = config
                .registry()
                .map_err(|e| JsValue::from_str(&format!("Failed to build registry: {}", e)))?;
            result = result
                .as_base_in(&registry)
                .map_err(|e| JsValue::from_str(&format!("Failed to normalize: {}", e)))?;
        }

        serde_json::to_string(&result)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
    }

    /// Normalize a single quantity string (e.g. "3 cP") to SI base units
    #[wasm_bindgen]
    pub fn as_base(&self, quantity: &str) -> Result<String, JsValue> {
        let quantity: Quantity = quantity
            .parse()
            .map_err(|e| JsValue::from_str(&format!("Failed to parse quantity: {}", e)))?;
        let base = quantity
            .as_base()
            .map_err(|e| JsValue::from_str(&format!("Failed to normalize: {}", e)))?;
        Ok(base.to_string())
    }
}
