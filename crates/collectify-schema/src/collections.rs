//! Built-in collection definitions.

use collectify_core::TeamVariant;

use crate::{
    schema::{EntitySchema, FieldSpec},
    validator::FieldKind,
};

/// Team members and authors.
pub const TEAM: &str = "team";
/// Tags.
pub const TAGS: &str = "tags";
/// Blog posts.
pub const POSTS: &str = "posts";
/// Resources.
pub const RESOURCES: &str = "resources";

/// Roles of the full team definition.
pub const TEAM_ROLES: [&str; 5] = ["Software", "Design", "Marketing", "Content", "Community"];
/// Role of the single-role author definition.
pub const AUTHOR_ROLES: [&str; 1] = ["Author"];

/// Upper bound on resource titles.
pub const TITLE_MAX: usize = 100;
/// Upper bound on resource descriptions.
pub const DESCRIPTION_MAX: usize = 200;

/// Message for a title over [`TITLE_MAX`].
pub const TITLE_TOO_LONG: &str = "Title must be 100 characters or less";
/// Message for a description over [`DESCRIPTION_MAX`].
pub const DESCRIPTION_TOO_LONG: &str = "Description must be 200 characters or less";

/// Team member schema for the chosen variant.
pub fn team_schema(variant: TeamVariant) -> EntitySchema {
    let mut fields = vec![FieldSpec::required("name", FieldKind::string())];

    let roles: &[&str] = match variant {
        TeamVariant::Team => {
            fields.push(FieldSpec::required("bio", FieldKind::string()));
            &TEAM_ROLES
        }
        TeamVariant::Author => &AUTHOR_ROLES,
    };

    fields.push(FieldSpec::required("email", FieldKind::Email));
    fields.push(FieldSpec::required(
        "role",
        FieldKind::enumeration(roles.iter().copied()),
    ));
    fields.push(FieldSpec::required("headshot", FieldKind::Image));

    EntitySchema::data(fields)
}

/// Tag schema.
pub fn tag_schema() -> EntitySchema {
    EntitySchema::data(vec![
        FieldSpec::required("name", FieldKind::string()),
        FieldSpec::required("color", FieldKind::string()),
    ])
}

/// Resource/post front matter schema.
pub fn resource_schema() -> EntitySchema {
    EntitySchema::content(vec![
        FieldSpec::required("title", FieldKind::string_max(TITLE_MAX, TITLE_TOO_LONG)),
        FieldSpec::required(
            "description",
            FieldKind::string_max(DESCRIPTION_MAX, DESCRIPTION_TOO_LONG),
        ),
        FieldSpec::required("date", FieldKind::Date),
        FieldSpec::required("author", FieldKind::reference(TEAM)),
        FieldSpec::optional("relatedPosts", FieldKind::list(FieldKind::reference(POSTS))),
        FieldSpec::optional("tags", FieldKind::list(FieldKind::reference(TAGS))),
    ])
}
