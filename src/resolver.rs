use tracing::trace;

use crate::context::CallContext;
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::methods::Registry;
use crate::scanner;
use crate::sink;
use crate::value::Value;

/// What a template turns into once its references are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The template with every reference replaced by `{}`.
    pub template: String,
    /// One value per placeholder that replaced a reference, in order.
    pub values: Vec<Value>,
}

impl Resolution {
    /// The message as a positional backend would print it.
    pub fn render(&self) -> String {
        sink::format_positional(&self.template, &self.values)
    }
}

/// Turns message templates into clean templates plus resolved values.
///
/// A resolver holds nothing but its method registry, so one instance can be
/// shared freely; every call builds its own [`CallContext`].
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Registry,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Registry::with_builtins())
    }
}

impl Resolver {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register more methods, e.g. for the object types a caller logs.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Resolve every reference in `template` against `arguments` and, for
    /// statements logged after a call, its `result`.
    ///
    /// Fails on the first reference that does not parse or names something the
    /// referenced value does not have; absent values never fail.
    pub fn resolve(&self, template: &str, arguments: &[Value], result: Option<Value>) -> Result<Resolution> {
        let references = scanner::scan(template);
        if references.is_empty() {
            return Ok(Resolution {
                template: template.to_string(),
                values: Vec::new(),
            });
        }

        let context = CallContext::build(arguments, result);
        let evaluator = Evaluator::new(&self.registry, &context);
        let values = references
            .iter()
            .map(|reference| evaluator.evaluate_text(reference.expression))
            .collect::<Result<Vec<_>>>()?;

        trace!(
            references = references.len(),
            params = context.param_count(),
            has_result = context.has_result(),
            "resolved message template"
        );

        Ok(Resolution {
            template: scanner::clean(template).into_owned(),
            values,
        })
    }
}
