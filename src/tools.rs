use std::collections::HashMap;
use futures::future::BoxFuture;
use serde_json::Value;

/// A tool function: takes JSON args, resolves to a string result or error string.
/// Boxed and Send + Sync so the registry can live behind the engine.
pub type ToolFn = Box<dyn Fn(HashMap<String, Value>) -> BoxFuture<'static, Result<String, String>> + Send + Sync>;

/// Tool schema for sending to the LLM (OpenAI function format)
#[derive(Debug, Clone, serde::Serialize)]
pub struct ToolSchema {
    pub name:         String,
    pub description:  String,
    pub input_schema: Value,   // JSON Schema object
}

/// Registered tool entry
struct ToolEntry {
    schema: ToolSchema,
    func:   ToolFn,
}

pub struct ToolRegistry {
    tools: HashMap<String, ToolEntry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Register a tool with its schema and implementation.
    ///
    /// # Arguments
    /// * `name`        - Unique tool name, the one the model calls
    /// * `description` - What the tool does and when the model should use it
    /// * `schema`      - JSON Schema for the input parameters
    /// * `func`        - The actual implementation
    pub fn register(
        &mut self,
        name:        impl Into<String>,
        description: impl Into<String>,
        schema:      Value,
        func:        ToolFn,
    ) {
        let name = name.into();
        self.tools.insert(name.clone(), ToolEntry {
            schema: ToolSchema {
                name:         name.clone(),
                description:  description.into(),
                input_schema: schema,
            },
            func,
        });
    }

    /// Execute a named tool with given arguments.
    /// Unknown tools and tool errors both come back as `Err(String)`.
    pub async fn execute(&self, name: &str, args: &HashMap<String, Value>) -> Result<String, String> {
        match self.tools.get(name) {
            Some(entry) => (entry.func)(args.clone()).await,
            None        => Err(format!("Tool '{}' not found in registry", name)),
        }
    }

    /// Returns true if a tool with this name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Returns all tool schemas, sorted by name for stable requests.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|e| e.schema.clone()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self { Self::new() }
}
