//! Table definitions, applied in order by `Database::migrate`.
//!
//! `planet_id` and `people_id` are intentionally not foreign keys: deleting a
//! planet or person leaves its favorites in place, and listings skip them.

pub const STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "users" (
        "id" INTEGER PRIMARY KEY AUTOINCREMENT,
        "email" VARCHAR(120) NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "people" (
        "id" INTEGER PRIMARY KEY AUTOINCREMENT,
        "people_name" VARCHAR(250),
        "age" INTEGER CHECK ("age" >= 0),
        "force_alignment" VARCHAR(250),
        "height" INTEGER CHECK ("height" > 0)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "planets" (
        "id" INTEGER PRIMARY KEY AUTOINCREMENT,
        "planet_name" VARCHAR(250) NOT NULL,
        "population" INTEGER NOT NULL DEFAULT 0 CHECK ("population" >= 0),
        "weather" VARCHAR(250) NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "favorites" (
        "id" INTEGER PRIMARY KEY AUTOINCREMENT,
        "user_id" INTEGER NOT NULL REFERENCES "users" ("id"),
        "planet_id" INTEGER,
        "people_id" INTEGER,
        CHECK (("planet_id" IS NULL) <> ("people_id" IS NULL))
    )"#,
    r#"CREATE UNIQUE INDEX IF NOT EXISTS "favorites_user_planet" ON "favorites" ("user_id", "planet_id")"#,
    r#"CREATE UNIQUE INDEX IF NOT EXISTS "favorites_user_people" ON "favorites" ("user_id", "people_id")"#,
];
