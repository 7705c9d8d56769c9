// ============================================================================
// Basic Usage Example
// ============================================================================

use serde_json::json;
use std::sync::Arc;
use webcalc::prelude::*;

fn main() {
    println!("=== WebCalc Example ===\n");

    // Default context: 28 significant digits, round-half-even
    let calculator = CalculatorBuilder::new()
        .event_handler(Arc::new(LoggingEventHandler))
        .build()
        .unwrap();

    println!("Context: {:?}\n", calculator.context());

    let payloads = [
        json!({"operand1": "1.1", "operand2": "2.2", "operation": "add"}),
        json!({"operand1": 1, "operand2": 3, "operation": "/"}),
        json!({"operand1": "1.5", "operand2": "2", "operation": "times"}),
        json!({"operand1": "2.5E-3", "operand2": "0.0005", "operation": "minus"}),
        json!({"operand1": "1e20", "operand2": "1e20", "operation": "*"}),
        json!({"operand1": "10", "operand2": "0", "operation": "divide"}),
        json!({"operand1": "abc", "operand2": "1", "operation": "add"}),
        json!({"operand1": "1", "operand2": "2", "operation": "pow"}),
    ];

    for payload in &payloads {
        match calculator.calculate(payload) {
            Ok(result) => println!(
                "{} {} {} = {}",
                result.operand1,
                result.operation,
                result.operand2,
                result.result_text()
            ),
            Err(error) => println!("{payload} -> error: {error}"),
        }
    }

    // Reduced precision with a different rounding mode
    println!("\n=== Five significant digits ===");
    for rounding in [
        RoundingMode::HalfEven,
        RoundingMode::Down,
        RoundingMode::Up,
        RoundingMode::ZeroFiveUp,
    ] {
        let calculator = CalculatorBuilder::new()
            .precision(5)
            .rounding(rounding)
            .build()
            .unwrap();

        let result = calculator
            .calculate(&json!({"operand1": "2", "operand2": "3", "operation": "divide"}))
            .unwrap();
        println!("{:<16} 2 / 3 = {}", rounding.name(), result.result_text());
    }
}
