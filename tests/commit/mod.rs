mod commit_rejects_empty_or_unchanged_snapshots;
