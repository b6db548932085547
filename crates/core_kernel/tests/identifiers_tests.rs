//! Unit tests for the identifier newtypes

use core_kernel::{ClaimId, ParkingLotId, UserId};
use proptest::prelude::*;
use uuid::Uuid;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(ClaimId::new(), ClaimId::new());
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ClaimId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ClaimId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(ClaimId::prefix(), "CLM");
        assert_eq!(UserId::prefix(), "USR");
        assert_eq!(ParkingLotId::prefix(), "LOT");
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("CLM-not-a-uuid".parse::<ClaimId>().is_err());
        assert!("".parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_from_str_tolerates_surrounding_whitespace() {
        let id = UserId::new();
        let parsed: UserId = format!("  {}\n", id).parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_serde_is_transparent() {
        let uuid = Uuid::new_v4();
        let id = ParkingLotId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}

proptest! {
    #[test]
    fn prop_display_parses_back(bytes in any::<[u8; 16]>()) {
        let id = ParkingLotId::from_uuid(Uuid::from_bytes(bytes));
        let parsed: ParkingLotId = id.to_string().parse().unwrap();
        prop_assert_eq!(id, parsed);
    }
}
