//! Assembles the program evaluated inside an execution context.

use serde_json::Value;

/// Name of the helper scripts call to reject their input.
pub const VALIDATION_HELPER: &str = "fail";

/// Name the input value is bound to.
pub const INPUT_BINDING: &str = "data";

/// Name of the entry point the script must define.
pub const ENTRY_POINT: &str = "build";

/// Builds a self-contained program around an untrusted `script`.
///
/// The program is a single expression whose value is the JSON encoding of
/// `build(data)`. The script is spliced verbatim; only the input is encoded.
pub fn compose(script: &str, input: &Value) -> String {
    let input_literal = encode_literal(input);

    format!(
        "(function () {{\n\
         function {VALIDATION_HELPER}(message) {{ throw ({{ type: \"validation\", message }}); }}\n\
         {script}\n\
         ;\n\
         const {INPUT_BINDING} = {input_literal};\n\
         const out = {ENTRY_POINT}({INPUT_BINDING});\n\
         return JSON.stringify(out);\n\
         }})()"
    )
}

/// Encodes `input` as a JavaScript expression.
///
/// JSON is a syntactic subset of JavaScript once the two line terminators that
/// JSON allows raw inside strings are escaped as well.
fn encode_literal(input: &Value) -> String {
    input.to_string().replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029")
}
