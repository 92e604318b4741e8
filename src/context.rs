use crate::ast::Root;
use crate::value::Value;

/// Per-call bindings for root markers: `p0`, `p1`, … and, when a result was
/// produced, `r`.
///
/// Optional containers are unwrapped on the way in, so an empty optional is
/// bound to [`Value::Absent`]. An unbound `r` (no result supplied) is a
/// different state from `r` bound to `Absent`, although both evaluate to
/// absence.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    params: Vec<Value>,
    result: Option<Value>,
}

impl CallContext {
    pub fn build(arguments: &[Value], result: Option<Value>) -> Self {
        Self {
            params: arguments.iter().cloned().map(Value::unwrap_optional).collect(),
            result: result.map(Value::unwrap_optional),
        }
    }

    /// The value bound to `root`, or `None` when nothing is bound to it.
    pub fn get(&self, root: Root) -> Option<&Value> {
        match root {
            Root::Param(i) => self.params.get(i),
            Root::Result => self.result.as_ref(),
        }
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_params_by_position() {
        let ctx = CallContext::build(&[Value::from("a"), Value::from(2)], None);
        assert_eq!(ctx.get(Root::Param(0)), Some(&Value::from("a")));
        assert_eq!(ctx.get(Root::Param(1)), Some(&Value::Int(2)));
        assert_eq!(ctx.get(Root::Param(2)), None);
        assert_eq!(ctx.param_count(), 2);
    }

    #[test]
    fn unwraps_optional_arguments() {
        let ctx = CallContext::build(&[Value::some("x"), Value::empty_optional()], None);
        assert_eq!(ctx.get(Root::Param(0)), Some(&Value::from("x")));
        assert_eq!(ctx.get(Root::Param(1)), Some(&Value::Absent));
    }

    #[test]
    fn result_is_unbound_unless_supplied() {
        let ctx = CallContext::build(&[], None);
        assert!(!ctx.has_result());
        assert_eq!(ctx.get(Root::Result), None);

        let ctx = CallContext::build(&[], Some(Value::empty_optional()));
        assert!(ctx.has_result());
        assert_eq!(ctx.get(Root::Result), Some(&Value::Absent));
    }
}
