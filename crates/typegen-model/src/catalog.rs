//! Built-in type systems shipped with the generator.

use crate::types::definition::TypeDefinition;
use crate::types::property::{PropertyDefinition, PropertyType};
use crate::types::system::TypeSystem;

/// Names of the built-in systems, as accepted by [`builtin`].
pub const BUILTIN_NAMES: &[&str] = &["chat"];

/// Look up a built-in type system by name.
pub fn builtin(name: &str) -> Option<TypeSystem> {
    match name {
        "chat" => Some(chat_type_system()),
        _ => None,
    }
}

/// Chat request types of the language-server protocol extensions.
pub fn chat_type_system() -> TypeSystem {
    use PropertyType as T;

    let types = vec![
        TypeDefinition::record(
            "Position",
            vec![
                PropertyDefinition::required("line", T::primitive("number")),
                PropertyDefinition::required("character", T::primitive("number")),
            ],
        )
        .with_description("Represents a position in a text document"),
        TypeDefinition::record(
            "Range",
            vec![
                PropertyDefinition::required("start", T::reference("Position")),
                PropertyDefinition::required("end", T::reference("Position")),
            ],
        )
        .with_description("Represents a range in a text document"),
        TypeDefinition::record(
            "TextDocumentIdentifier",
            vec![PropertyDefinition::required("uri", T::primitive("string"))],
        )
        .with_description("Identifies a text document"),
        TypeDefinition::record(
            "QuickActionCommand",
            vec![
                PropertyDefinition::required("command", T::primitive("string")),
                PropertyDefinition::optional("arguments", T::array(T::primitive("any"))),
            ],
        )
        .with_description("Represents a quick action command"),
        TypeDefinition::record(
            "ChatPrompt",
            vec![
                PropertyDefinition::optional("prompt", T::primitive("string")),
                PropertyDefinition::optional("escapedPrompt", T::primitive("string")),
                PropertyDefinition::optional("command", T::primitive("string")),
            ],
        )
        .with_description("Represents a chat prompt"),
        // Number or string on the wire
        TypeDefinition::record(
            "PartialResultParams",
            vec![PropertyDefinition::optional(
                "partialResultToken",
                T::primitive("any"),
            )],
        )
        .with_description("Parameters for partial results"),
        TypeDefinition::record(
            "CursorStateWithPosition",
            vec![PropertyDefinition::required("position", T::reference("Position"))],
        )
        .with_description("Cursor state with position"),
        TypeDefinition::record(
            "CursorStateWithRange",
            vec![PropertyDefinition::required("range", T::reference("Range"))],
        )
        .with_description("Cursor state with range"),
        TypeDefinition::union(
            "CursorState",
            ["CursorStateWithPosition", "CursorStateWithRange"],
        )
        .with_description("Represents the state of a cursor"),
        TypeDefinition::record(
            "ChatParams",
            vec![
                PropertyDefinition::required("tabId", T::primitive("string")),
                PropertyDefinition::required("prompt", T::reference("ChatPrompt")),
                PropertyDefinition::optional("cursorState", T::array(T::reference("CursorState"))),
                PropertyDefinition::optional("textDocument", T::reference("TextDocumentIdentifier")),
                PropertyDefinition::optional(
                    "context",
                    T::array(T::reference("QuickActionCommand")),
                )
                .with_description(
                    "Context of the current chat message to be handled by the servers. \
                     Context can be added through QuickActionCommand triggered by `@`.",
                ),
            ],
        )
        .with_parent("PartialResultParams")
        .with_description("Parameters for a chat request"),
    ];

    TypeSystem::new(Some("com.example.chat".to_string()), types)
}
