table! {
    articles (id) {
        id -> Integer,
        external_id -> Text,
        import_date -> Timestamp,
        title -> Text,
        description -> Text,
        publication_date -> Timestamp,
        link -> Text,
        main_picture -> Text,
    }
}

table! {
    imports (id) {
        id -> Integer,
        import_date -> Timestamp,
        raw_content -> Text,
    }
}

allow_tables_to_appear_in_same_query!(articles, imports,);
