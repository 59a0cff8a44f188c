pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_reports_counts() {
        let h = types::Health::ok(2, 5, 1);
        assert_eq!(h.status, "ok");
        assert_eq!((h.users, h.complaints, h.resolved), (2, 5, 1));
    }
}
