mod checkout_commit_into_empty_directory;
mod checkout_into_non_empty_directory_fails;
mod commit_on_top_of_head;
mod list_all_blobs_from_head_commit;
mod list_top_level_of_head_tree;
mod show_log_from_head_commit;
