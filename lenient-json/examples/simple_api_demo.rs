// Example walking a value tree produced by the lenient deserializer

use lenient_json::{from_str, ParseError, Value};

fn describe(value: &Value, indent: usize) {
    let pad = " ".repeat(indent);
    match value {
        Value::Map(map) => {
            println!("{pad}Map ({} members)", map.len());
            for (key, member) in map {
                println!("{pad}  Key: '{key}'");
                describe(member, indent + 4);
            }
        }
        Value::List(items) => {
            println!("{pad}List ({} items)", items.len());
            for item in items {
                describe(item, indent + 2);
            }
        }
        Value::String(s) => println!("{pad}String: '{s}'"),
        Value::Int32(n) => println!("{pad}Int32: {n}"),
        Value::Int64(n) => println!("{pad}Int64: {n}"),
        Value::Decimal(d) => println!("{pad}Decimal: {d}"),
        Value::Float64(f) => println!("{pad}Float64: {f}"),
        Value::Bool(b) => println!("{pad}Bool: {b}"),
        Value::Null => println!("{pad}Null"),
    }
}

fn main() -> Result<(), ParseError> {
    let json = r#"{name: 'value', "number": 42, big: 9007199254740993, ratio: 0.75, avogadro: 6.02e23, tags: ['a', "b"], flag: true, none: null}"#;
    println!("Input: {}", json);

    let value = from_str(json)?;
    describe(&value, 0);

    println!();
    match from_str("[1, 2,]") {
        Err(e) => println!("Rejected as expected: {:?}: {}", e.kind(), e),
        Ok(v) => println!("Unexpectedly accepted: {:?}", v),
    }
    Ok(())
}
