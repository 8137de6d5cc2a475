mod create_branch;
mod delete_branch;
