/// Read-through caching for an async computation.
///
/// Returns the cached value for `$key` when present. Otherwise awaits `$block`,
/// queues its value for storage with a lifetime of `$ttl` seconds, and returns it.
/// A failed cache read is logged and treated as a miss. Errors from `$block` are
/// propagated with `?`, so the macro can only be used inside functions returning
/// `AppResult`.
///
/// # Example
/// ```rust,ignore
/// let videos: Vec<Video> = cached!(cache, CacheKey::VideosForUser { user_id }, ttl, async {
///     store.list_videos_by_genres(&genres).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        let hit = match $cache.get_from_cache(&key).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, using store");
                None
            }
        };

        if let Some(cached) = hit {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
