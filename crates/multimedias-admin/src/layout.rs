//! Form and list layouts for the media admin screens
//!
//! Everything here is static configuration consumed by the admin
//! scaffolding: which fields show up where, which are read-only, which list
//! columns, filters and search fields exist.

use crate::actions::AdminAction;

/// Whether the form edits a new object or an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    pub fn for_existing(exists: bool) -> Self {
        if exists {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }
}

/// One line of a fieldset: a single field or fields laid out side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRow {
    Single(&'static str),
    Inline(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct Fieldset {
    pub title: &'static str,
    pub classes: &'static [&'static str],
    pub rows: &'static [FieldRow],
}

impl Fieldset {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rows.iter().flat_map(|row| match row {
            FieldRow::Single(field) => std::slice::from_ref(field).iter().copied(),
            FieldRow::Inline(fields) => fields.iter().copied(),
        })
    }
}

pub const MEDIA_FIELDSETS: &[Fieldset] = &[
    Fieldset {
        title: "Identification",
        classes: &[],
        rows: &[
            FieldRow::Single("site"),
            FieldRow::Single("title"),
            FieldRow::Single("slug"),
            FieldRow::Single("get_http_absolute_url"),
            FieldRow::Single("short_url"),
            FieldRow::Inline(&["main_image", "image_thumb"]),
        ],
    },
    Fieldset {
        title: "Content",
        classes: &[],
        rows: &[
            FieldRow::Single("short_title"),
            FieldRow::Single("hat"),
            FieldRow::Single("headline"),
            FieldRow::Single("media_file"),
            FieldRow::Single("tags"),
        ],
    },
    Fieldset {
        title: "Relationships",
        classes: &[],
        rows: &[FieldRow::Single("channel")],
    },
    Fieldset {
        title: "Publication",
        classes: &["extrapretty"],
        rows: &[
            FieldRow::Single("published"),
            FieldRow::Single("date_available"),
            FieldRow::Single("show_on_root_channel"),
        ],
    },
];

/// Read-only on every content form.
const CONTENT_READONLY_FIELDS: &[&str] = &["get_http_absolute_url", "short_url", "image_thumb"];

/// Publication state is driven by the upload pipeline, never by hand.
const PUBLICATION_READONLY_FIELDS: &[&str] = &["published", "date_available"];

/// Read-only media form fields for `mode`. Once a media item exists its file
/// cannot be swapped.
pub fn media_readonly_fields(mode: FormMode) -> Vec<&'static str> {
    let mut fields: Vec<&'static str> = CONTENT_READONLY_FIELDS
        .iter()
        .chain(PUBLICATION_READONLY_FIELDS)
        .copied()
        .collect();
    if mode == FormMode::Edit {
        fields.push("media_file");
    }
    fields
}

/// Tabular inline editor shown under a parent object's form.
#[derive(Debug, Clone, Copy)]
pub struct InlineConfig {
    pub model: &'static str,
    pub fk_name: &'static str,
    pub raw_id_fields: &'static [&'static str],
    pub extra: u32,
    pub classes: &'static [&'static str],
    pub fields: &'static [&'static str],
}

/// List view and form wiring for a non-media admin screen.
#[derive(Debug, Clone, Copy)]
pub struct ListConfig {
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub raw_id_fields: &'static [&'static str],
    pub exclude: &'static [&'static str],
    /// (field, source fields) pairs filled in client-side while typing
    pub prepopulated_fields: &'static [(&'static str, &'static [&'static str])],
    pub fieldsets: &'static [Fieldset],
    pub inlines: &'static [InlineConfig],
    pub actions: &'static [AdminAction],
}

pub const MEDIABOX_VIDEOS_INLINE: InlineConfig = InlineConfig {
    model: "mediabox_video",
    fk_name: "mediabox",
    raw_id_fields: &["video"],
    extra: 1,
    classes: &["collapse"],
    fields: &["video", "order", "date_available", "date_end"],
};

pub const MEDIABOX_AUDIOS_INLINE: InlineConfig = InlineConfig {
    model: "mediabox_audio",
    fk_name: "mediabox",
    raw_id_fields: &["audio"],
    extra: 1,
    classes: &["collapse"],
    fields: &["audio", "order", "date_available", "date_end"],
};

pub const MEDIABOX_ADMIN: ListConfig = ListConfig {
    list_display: &["name", "date_available", "published"],
    list_filter: &["date_available", "published"],
    search_fields: &[],
    raw_id_fields: &["channel", "article"],
    exclude: &["user"],
    prepopulated_fields: &[("slug", &["name"])],
    fieldsets: &[
        Fieldset {
            title: "Identification",
            classes: &[],
            rows: &[
                FieldRow::Single("site"),
                FieldRow::Single("name"),
                FieldRow::Single("slug"),
            ],
        },
        Fieldset {
            title: "Relationships",
            classes: &[],
            rows: &[FieldRow::Inline(&["channel", "article"])],
        },
        Fieldset {
            title: "Publication",
            classes: &["extrapretty"],
            rows: &[
                FieldRow::Single("published"),
                FieldRow::Single("date_available"),
            ],
        },
    ],
    inlines: &[MEDIABOX_VIDEOS_INLINE, MEDIABOX_AUDIOS_INLINE],
    actions: &[AdminAction::CleanEndedEntries],
};

pub const MEDIA_CONFIG_ADMIN: ListConfig = ListConfig {
    list_display: &[
        "key",
        "key_group",
        "channel",
        "date_insert",
        "date_available",
        "published",
    ],
    list_filter: &["key", "key_group", "channel", "published"],
    search_fields: &["key", "key_group", "value"],
    raw_id_fields: &["audio", "video", "channel", "article"],
    exclude: &["user"],
    prepopulated_fields: &[],
    fieldsets: &[],
    inlines: &[],
    actions: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_mode_is_superset_of_create_mode() {
        let create = media_readonly_fields(FormMode::Create);
        let edit = media_readonly_fields(FormMode::Edit);
        assert!(create.iter().all(|f| edit.contains(f)));
        assert!(edit.contains(&"media_file"));
        assert!(!create.contains(&"media_file"));
        assert!(create.contains(&"published"));
        assert!(create.contains(&"date_available"));
    }

    #[test]
    fn form_mode_follows_object_existence() {
        assert_eq!(FormMode::for_existing(false), FormMode::Create);
        assert_eq!(FormMode::for_existing(true), FormMode::Edit);
    }

    #[test]
    fn media_fieldsets_flatten_inline_rows() {
        let identification: Vec<_> = MEDIA_FIELDSETS[0].fields().collect();
        assert_eq!(
            identification,
            vec![
                "site",
                "title",
                "slug",
                "get_http_absolute_url",
                "short_url",
                "main_image",
                "image_thumb"
            ]
        );
        assert!(MEDIA_FIELDSETS
            .iter()
            .any(|fs| fs.fields().any(|f| f == "media_file")));
    }

    #[test]
    fn readonly_fields_all_appear_in_layout() {
        for field in media_readonly_fields(FormMode::Edit) {
            assert!(
                MEDIA_FIELDSETS.iter().any(|fs| fs.fields().any(|f| f == field)),
                "{field} missing from fieldsets"
            );
        }
    }

    #[test]
    fn mediabox_admin_wiring() {
        assert_eq!(MEDIABOX_ADMIN.actions, &[AdminAction::CleanEndedEntries]);
        assert_eq!(MEDIABOX_ADMIN.inlines.len(), 2);
        assert!(MEDIABOX_ADMIN.inlines.iter().all(|i| i.extra == 1));
        assert_eq!(MEDIABOX_ADMIN.prepopulated_fields, &[("slug", &["name"][..])]);
    }

    #[test]
    fn media_config_search_fields() {
        assert_eq!(MEDIA_CONFIG_ADMIN.search_fields, &["key", "key_group", "value"]);
        assert!(MEDIA_CONFIG_ADMIN.actions.is_empty());
    }
}
