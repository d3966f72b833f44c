mod commands_outside_a_repository_fail;
mod init_inside_populated_git_directory_fails;
mod init_repository_successfully;
