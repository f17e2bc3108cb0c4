use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::types::format_number;

/// Text returned (as a successful tool result) for division by zero.
pub const DIVIDE_BY_ZERO: &str = "Error: Cannot divide by zero";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }
}

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

/// Apply `operation`; `None` only for division by zero.
pub fn calculate(operation: Operation, a: f64, b: f64) -> Option<f64> {
    match operation {
        Operation::Add => Some(a + b),
        Operation::Subtract => Some(a - b),
        Operation::Multiply => Some(a * b),
        Operation::Divide if b == 0.0 => None,
        Operation::Divide => Some(a / b),
    }
}

/// Tool-facing text: the shortest decimal rendering, or the divide-by-zero message.
pub fn calculate_text(operation: Operation, a: f64, b: f64) -> String {
    match calculate(operation, a, b) {
        Some(result) => format_number(result),
        None => DIVIDE_BY_ZERO.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::format_number;

    #[test]
    fn test_add() {
        assert_eq!(add(2.0, 3.0), 5.0);
        assert_eq!(add(-1.0, 1.0), 0.0);
        assert_eq!(format_number(add(2.0, 3.0)), "5");
        assert_eq!(format_number(add(0.25, 0.25)), "0.5");
    }

    #[test]
    fn test_operations() {
        assert_eq!(calculate_text(Operation::Subtract, 10.0, 4.0), "6");
        assert_eq!(calculate_text(Operation::Multiply, 3.0, 2.5), "7.5");
        assert_eq!(calculate_text(Operation::Divide, 10.0, 2.0), "5");
    }

    #[test]
    fn test_divide_by_zero_is_text() {
        assert_eq!(calculate(Operation::Divide, 4.0, 0.0), None);
        assert_eq!(
            calculate_text(Operation::Divide, 4.0, 0.0),
            "Error: Cannot divide by zero"
        );
    }

    #[test]
    fn test_results_render_like_javascript() {
        assert_eq!(calculate_text(Operation::Multiply, -1.0, 0.0), "0");
        assert_eq!(calculate_text(Operation::Multiply, 1e308, 10.0), "Infinity");
        assert_eq!(calculate_text(Operation::Multiply, 1e20, 10.0), "1e+21");
        assert_eq!(calculate_text(Operation::Divide, 1.0, 1e7), "1e-7");
        assert_eq!(calculate_text(Operation::Subtract, 0.3, 0.1), "0.19999999999999998");
    }

    #[test]
    fn test_operation_wire_names() {
        let op: Operation = serde_json::from_str("\"multiply\"").unwrap();
        assert_eq!(op, Operation::Multiply);
        assert_eq!(op.as_str(), "multiply");
        assert!(serde_json::from_str::<Operation>("\"modulo\"").is_err());
    }
}
