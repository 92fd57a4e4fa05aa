use super::*;


fn perms(list: &[&str]) -> Vec<String> {
    list.iter().map(|perm| perm.to_string()).collect()
}

fn position(id: &str, index: i32, list: &[&str]) -> PartialPosition {
    PartialPosition::new(id, index, perms(list))
}
