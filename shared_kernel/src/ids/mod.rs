mod string_ids;
mod uuid;
