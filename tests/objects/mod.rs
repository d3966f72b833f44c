mod cat_file_with_unknown_type_fails;
mod hash_object_outside_a_repository;
mod write_blob_object_successfully;
