use crate::models::{AdminData, USER_JID_SUFFIX};

/// Whether the logged-in user is a bot admin, matching either the bare
/// number or the full jid.
pub fn is_admin(user_id: &str, admins: &[AdminData]) -> bool {
    if user_id.is_empty() {
        return false;
    }
    let number = user_id.replace(USER_JID_SUFFIX, "");
    admins
        .iter()
        .any(|admin| admin.number == number || admin.full_id == user_id)
}
