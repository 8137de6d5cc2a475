mod init_in_existing_repository_fails;
mod init_repository_at_path;
mod init_repository_successfully;
