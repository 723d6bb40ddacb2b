/// Display path used for the embedded sample when no input is given.
pub const SAMPLE_PATH: &str = "<sample>";

/// The embedded schema excerpt: one class block and one function block.
/// Probed by default so the tool is useful with zero arguments.
pub const SAMPLE_SCHEMA: &str = r##"class Person {
    name string
    age int
}

function GetPerson(id: string) -> Person {
    client "test/model"
    prompt #"Get person with id {{ id }}"#
}"##;
