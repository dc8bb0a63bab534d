mod clear;
mod completions;
mod configure;
mod info;
mod man;
mod options;
mod query;
mod update;

pub(crate) use clear::run as clear;
pub(crate) use completions::run as completions;
pub(crate) use configure::run as configure;
pub(crate) use info::run as info;
pub(crate) use man::run as man;
pub(crate) use options::run as options;
pub(crate) use query::{
    backend, branches, commit_key, current_branch, current_tags, remotes, sha, status, tags, url,
};
pub(crate) use update::{checkout, fetch, move_to};
