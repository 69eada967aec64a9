//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Graph members.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        balance -> Float8,
    }
}

diesel::table! {
    /// Seeded membership tiers, keyed by their enum name.
    member_types (id) {
        id -> Varchar,
        discount -> Float8,
        posts_limit_per_month -> Int4,
    }
}

diesel::table! {
    /// At most one profile per user (`user_id` is unique).
    profiles (id) {
        id -> Uuid,
        is_male -> Bool,
        year_of_birth -> Int4,
        user_id -> Uuid,
        member_type_id -> Varchar,
    }
}

diesel::table! {
    posts (id) {
        id -> Uuid,
        title -> Varchar,
        content -> Text,
        author_id -> Uuid,
    }
}

diesel::table! {
    /// Directed follow edges: `subscriber_id` follows `author_id`.
    subscriptions (subscriber_id, author_id) {
        subscriber_id -> Uuid,
        author_id -> Uuid,
    }
}

diesel::joinable!(profiles -> users (user_id));
diesel::joinable!(profiles -> member_types (member_type_id));
diesel::joinable!(posts -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, member_types, profiles, posts, subscriptions);
