pub type CmdResult<T> = state_rewrite::Result<(T, i32)>;

pub mod rewrite;
