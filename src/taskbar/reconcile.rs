use crate::sources::AppId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Create {
    pub id: AppId,
    pub slot: usize,
}

/// Survivors are never explicitly moved; the apply phase re-seats them.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct EditScript {
    pub creates: Vec<Create>,
    pub removes: Vec<AppId>,
}

impl EditScript {
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.removes.is_empty()
    }
}

/// Single forward merge with two cursors, O(n). Not a minimal edit
/// distance: an order reversal can destroy and recreate survivors.
pub(super) fn diff(old: &[AppId], target: &[AppId]) -> EditScript {
    let mut script = EditScript::default();
    let mut old_index = 0;
    let mut new_index = 0;

    while new_index < target.len() || old_index < old.len() {
        let old_id = old.get(old_index);
        let new_id = target.get(new_index);

        if old_id.is_some() && old_id == new_id {
            old_index += 1;
            new_index += 1;
            continue;
        }

        if let Some(old_id) = old_id {
            if !target.contains(old_id) {
                script.removes.push(old_id.clone());
                old_index += 1;
                continue;
            }
        }

        if let Some(new_id) = new_id {
            if !old.contains(new_id) {
                script.creates.push(Create {
                    id: new_id.clone(),
                    slot: new_index,
                });
                new_index += 1;
                continue;
            }
        }

        // Both cursors hold ids known to the other side but misaligned.
        // Create now when that realigns the cursors next round, or when
        // the wanted id is already scheduled for removal in this pass;
        // otherwise remove on the old side and retry.
        if let Some(new_id) = new_id {
            let realigns = old_id.is_some() && target.get(new_index + 1) == old_id;
            let recreated = script.removes.contains(new_id);
            if realigns || recreated || old_id.is_none() {
                script.creates.push(Create {
                    id: new_id.clone(),
                    slot: new_index + script.removes.len(),
                });
                new_index += 1;
                continue;
            }
        }

        if let Some(old_id) = old_id {
            script.removes.push(old_id.clone());
            old_index += 1;
        } else {
            break;
        }
    }

    script
}

pub(super) fn separator_boundary(pinned_in_target: usize, total_displayed: usize) -> Option<usize> {
    if pinned_in_target > 0 && pinned_in_target < total_displayed {
        Some(pinned_in_target)
    } else {
        None
    }
}
