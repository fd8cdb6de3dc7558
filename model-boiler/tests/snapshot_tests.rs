//! Snapshot tests for generated Swift code.
//!
//! These tests use insta inline snapshots to pin the exact emitted text.
//! Run `cargo insta review` to review and accept snapshot changes.

use model_boiler::{generate, GeneratorConfig};

fn boil(source: &str) -> String {
    generate(source, &GeneratorConfig::default()).unwrap()
}

// =============================================================================
// Basic Struct Snapshots
// =============================================================================

#[test]
fn snapshot_basic_struct() {
    let output = boil(
        r#"
struct User {
    let name: String
    var age: Int?
}
"#,
    );

    insta::assert_snapshot!(output, @r#"
    enum CodingKeys: String, CodingKey {
        case name = "name"
        case age = "age"
    }

    public func encode(to encoder: Encoder) throws {
        var container = encoder.container(keyedBy: CodingKeys.self)
        try container.encode(name, forKey: .name)
        try container.encode(age, forKey: .age)
    }

    public init(from decoder: Decoder) throws {
        let container = try decoder.container(keyedBy: CodingKeys.self)
        name = try container.decode(String.self, forKey: .name)
        age = try container.decodeIfPresent(Int.self, forKey: .age)
    }
    "#);
}

#[test]
fn snapshot_inferred_types() {
    let output = boil(
        r#"
final class Settings {
    var count = 1
    var ratio = 2.33
    var title = "Hello"
    var enabled = true
    var custom = CustomType()
}
"#,
    );

    insta::assert_snapshot!(output, @r#"
    enum CodingKeys: String, CodingKey {
        case count = "count"
        case ratio = "ratio"
        case title = "title"
        case enabled = "enabled"
        case custom = "custom"
    }

    public func encode(to encoder: Encoder) throws {
        var container = encoder.container(keyedBy: CodingKeys.self)
        try container.encode(count, forKey: .count)
        try container.encode(ratio, forKey: .ratio)
        try container.encode(title, forKey: .title)
        try container.encode(enabled, forKey: .enabled)
        try container.encode(custom, forKey: .custom)
    }

    public init(from decoder: Decoder) throws {
        let container = try decoder.container(keyedBy: CodingKeys.self)
        count = try container.decode(Int.self, forKey: .count)
        ratio = try container.decode(Double.self, forKey: .ratio)
        title = try container.decode(String.self, forKey: .title)
        enabled = try container.decode(Bool.self, forKey: .enabled)
        custom = try container.decode(CustomType.self, forKey: .custom)
    }
    "#);
}

// =============================================================================
// Configuration Snapshots
// =============================================================================

#[test]
fn snapshot_snake_case_keys() {
    let config = GeneratorConfig::new().with_snake_case(true);
    let output = generate(
        r#"
struct Profile {
    let userName: String
    let URLPath: String
    let id: Int
}
"#,
        &config,
    )
    .unwrap();

    insta::assert_snapshot!(output, @r#"
    enum CodingKeys: String, CodingKey {
        case userName = "user_name"
        case URLPath = "url_path"
        case id = "id"
    }

    public func encode(to encoder: Encoder) throws {
        var container = encoder.container(keyedBy: CodingKeys.self)
        try container.encode(userName, forKey: .userName)
        try container.encode(URLPath, forKey: .URLPath)
        try container.encode(id, forKey: .id)
    }

    public init(from decoder: Decoder) throws {
        let container = try decoder.container(keyedBy: CodingKeys.self)
        userName = try container.decode(String.self, forKey: .userName)
        URLPath = try container.decode(String.self, forKey: .URLPath)
        id = try container.decode(Int.self, forKey: .id)
    }
    "#);
}

#[test]
fn snapshot_only_initializer() {
    let config = GeneratorConfig::new().with_only_initializer(true);
    let output = generate(
        r#"
struct Point {
    let x: Double
    let y: Double
    let label: String?
}
"#,
        &config,
    )
    .unwrap();

    insta::assert_snapshot!(output, @r#"
    public init(from decoder: Decoder) throws {
        let container = try decoder.container(keyedBy: CodingKeys.self)
        x = try container.decode(Double.self, forKey: .x)
        y = try container.decode(Double.self, forKey: .y)
        label = try container.decodeIfPresent(String.self, forKey: .label)
    }
    "#);
}

// =============================================================================
// Nested Declaration Snapshots
// =============================================================================

#[test]
fn snapshot_nested_struct() {
    let output = boil(
        r#"
struct Outer {
    let name: String
    let inner: Inner

    struct Inner {
        let value: Int
    }
}
"#,
    );

    insta::assert_snapshot!(output, @r#"
    enum CodingKeys: String, CodingKey {
        case name = "name"
        case inner = "inner"
    }

    public func encode(to encoder: Encoder) throws {
        var container = encoder.container(keyedBy: CodingKeys.self)
        try container.encode(name, forKey: .name)
        try container.encode(inner, forKey: .inner)
    }

    public init(from decoder: Decoder) throws {
        let container = try decoder.container(keyedBy: CodingKeys.self)
        name = try container.decode(String.self, forKey: .name)
        inner = try container.decode(Outer.Inner.self, forKey: .inner)
    }

    enum CodingKeys: String, CodingKey {
        case value = "value"
    }

    public func encode(to encoder: Encoder) throws {
        var container = encoder.container(keyedBy: CodingKeys.self)
        try container.encode(value, forKey: .value)
    }

    public init(from decoder: Decoder) throws {
        let container = try decoder.container(keyedBy: CodingKeys.self)
        value = try container.decode(Int.self, forKey: .value)
    }
    "#);
}

#[test]
fn snapshot_nested_only_initializer() {
    let config = GeneratorConfig::new().with_only_initializer(true);
    let output = generate(
        r#"
public final class Library {
    let shelves: [Shelf]

    public struct Shelf {
        let books: [Book]?

        struct Book {
            let title: String
        }
    }
}
"#,
        &config,
    )
    .unwrap();

    insta::assert_snapshot!(output, @r#"
    public init(from decoder: Decoder) throws {
        let container = try decoder.container(keyedBy: CodingKeys.self)
        shelves = try container.decode([Library.Shelf].self, forKey: .shelves)
    }

    public init(from decoder: Decoder) throws {
        let container = try decoder.container(keyedBy: CodingKeys.self)
        books = try container.decodeIfPresent([Library.Shelf.Book].self, forKey: .books)
    }

    public init(from decoder: Decoder) throws {
        let container = try decoder.container(keyedBy: CodingKeys.self)
        title = try container.decode(String.self, forKey: .title)
    }
    "#);
}
