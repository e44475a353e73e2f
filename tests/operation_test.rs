use catena_gql::{
    field, make_mutation, make_query, mutation, no_arguments, query, EnumValue, Field, Literal,
    OperationKind,
};
use serde_json::json;
use std::borrow::Cow;

enum BoardKind {
    Public,
    Private,
}

impl EnumValue for BoardKind {
    fn symbol(&self) -> Cow<'_, str> {
        match self {
            BoardKind::Public => Cow::Borrowed("public"),
            BoardKind::Private => Cow::Borrowed("private"),
        }
    }
}

#[test]
fn test_query_wrapping() {
    let op = make_query("boards", ["id", "name"], no_arguments()).unwrap();
    assert_eq!(op.format_body(), "query { boards { id, name } }");
}

#[test]
fn test_query_macro_matches_factory() {
    let from_macro = query!("boards", "id", "name").unwrap();
    let from_factory = make_query("boards", ["id", "name"], no_arguments()).unwrap();
    assert_eq!(from_macro, from_factory);
}

#[test]
fn test_mutation_with_enum_and_object() {
    let op = mutation!(
        "create_board",
        "id";
        board_name = "Roadmap",
        board_kind = Literal::enumeration(&BoardKind::Private),
        template = json!({"columns": ["status"]})
    )
    .unwrap();

    assert_eq!(op.kind(), OperationKind::Mutation);
    assert_eq!(Literal::enumeration(&BoardKind::Public).to_graphql(), "public");
    assert_eq!(
        op.format_body(),
        concat!(
            r#"mutation { create_board (board_name:"Roadmap", board_kind:private, "#,
            r#"template:"{\"columns\": [\"status\"]}") { id } }"#
        )
    );
}

#[test]
fn test_nested_macros() {
    let updates = field!("updates", "id", "body", "replies.id", "replies.body"; limit = 5).unwrap();
    let op = query!("items", "id", updates; ids = vec![1, 2]).unwrap();
    assert_eq!(
        op.format_body(),
        "query { items (ids:[1, 2]) { id, updates (limit:5) { id, body, replies { id, body } } } }"
    );
}

#[test]
fn test_operation_keeps_empty_child_block() {
    let op = make_query("me", Vec::<String>::new(), no_arguments()).unwrap();
    assert_eq!(op.format_body(), "query { me {  } }");
}

#[test]
fn test_operation_field_access_through_deref() {
    let mut op = make_mutation("archive_item", ["id"], [("item_id", 99)]).unwrap();
    op.add_field("board.id");
    op.get_field_mut("board").unwrap().add_argument("active", true);

    assert_eq!(op.name(), "archive_item");
    assert_eq!(op.argument("item_id"), Some("99"));
    assert_eq!(
        op.format_body(),
        "mutation { archive_item (item_id:99) { id, board (active:true) { id } } }"
    );
}

#[test]
fn test_into_root_renders_plain_field() {
    let op = query!("boards", "id"; limit = 1).unwrap();
    let root: Field = op.into_root();
    assert_eq!(root.format_body(), "boards (limit:1) { id }");
}

#[test]
fn test_serialization_is_idempotent() {
    let op = query!("items", "id", "column_values.text"; limit = 2).unwrap();
    let first = op.format_body();
    let second = op.format_body();
    assert_eq!(first, second);
    assert_eq!(op.to_string(), first);
}

#[test]
fn test_request_payload_carries_variables() {
    let mut op = query!("items", "id").unwrap();
    op.add_query_variable("page", 2);
    op.add_query_variable("filters", json!({"state": "active"}));

    let request = op.to_request();
    assert_eq!(request.query, "query { items { id } }");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "query": "query { items { id } }",
            "variables": {"page": 2, "filters": {"state": "active"}}
        })
    );
}
