mod find_commits_by_message;
mod show_log_follows_first_parents;
