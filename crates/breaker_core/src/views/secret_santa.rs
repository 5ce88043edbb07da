use crate::models::{Participant, SecretSantaGroup};

/// Participants whose name, id or wished gift contains `search`, ignoring case.
/// A blank query keeps everyone.
pub fn filter_participants<'a>(participants: &'a [Participant], search: &str) -> Vec<&'a Participant> {
    if search.trim().is_empty() {
        return participants.iter().collect();
    }
    let needle = search.to_lowercase();
    participants
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.id.to_lowercase().contains(&needle)
                || p.gift
                    .as_deref()
                    .is_some_and(|gift| gift.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn is_me(group: &SecretSantaGroup, participant: &Participant) -> bool {
    group.user_id_in_group.as_deref() == Some(participant.id.as_str())
}

pub fn is_my_target(group: &SecretSantaGroup, participant: &Participant) -> bool {
    group
        .drawn_friend
        .as_ref()
        .is_some_and(|friend| friend.id == participant.id)
}
