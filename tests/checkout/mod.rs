mod checkout_files_from_commits;
