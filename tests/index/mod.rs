mod add_files_to_index_successfully;
mod add_generated_files_to_index_successfully;
mod adding_a_missing_file_fails;
mod remove_files_from_index_successfully;
mod removing_an_unstaged_path_fails;
mod write_tree_matches_committed_tree;
