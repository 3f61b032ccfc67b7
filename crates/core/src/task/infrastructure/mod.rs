pub(crate) mod live_stream_executor;
