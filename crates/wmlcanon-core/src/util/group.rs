/// Groups runs of adjacent items that share a key.
///
/// A single pass: either no group is open, or one group is open with its
/// key. An item with a different key closes the open group. Each group is
/// returned with the key it was built under.
pub fn group_adjacent<T, K, F>(items: impl IntoIterator<Item = T>, key_selector: F) -> Vec<(K, Vec<T>)>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut result: Vec<(K, Vec<T>)> = Vec::new();
    let mut current_group: Option<(K, Vec<T>)> = None;

    for item in items {
        let key = key_selector(&item);

        match &mut current_group {
            Some((current_key, group)) if *current_key == key => {
                group.push(item);
            }
            _ => {
                if let Some(group) = current_group.take() {
                    result.push(group);
                }
                current_group = Some((key, vec![item]));
            }
        }
    }

    if let Some(group) = current_group {
        result.push(group);
    }

    result
}
