use ammonia;

/// Sanitizes rich-text content fields (announcement content, sermon notes,
/// event descriptions) before storage.
///
/// Whitelist-based: safe tags like <b> and <p> survive, <script>/<iframe>
/// and event-handler attributes are stripped. Fail-safe against stored XSS
/// from the admin dashboard forms.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
