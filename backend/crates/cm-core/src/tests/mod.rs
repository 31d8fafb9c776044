mod classifier;
mod server_state;
