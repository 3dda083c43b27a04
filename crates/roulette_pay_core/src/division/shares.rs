//! Share computation.

use crate::error::{EngineError, EngineResult};
use crate::model::member::MemberId;
use crate::model::payment::PaymentShare;
use log::error;
use std::collections::HashSet;

/// Splits `total_amount` among `winners`, in winner order.
///
/// Every winner receives `total / n`; `remainder_recipient` additionally
/// receives `total % n`. A single winner pays everything.
///
/// # Errors
/// - `NonPositiveAmount` for a zero total.
/// - `EmptyWinners` for an empty list.
/// - `DuplicateWinner` when an id repeats (contract violation).
/// - `RemainderRecipientMissing` when the recipient is not a winner
///   (contract violation).
pub fn divide(
    total_amount: u64,
    winners: &[MemberId],
    remainder_recipient: MemberId,
) -> EngineResult<Vec<PaymentShare>> {
    if total_amount == 0 {
        return Err(EngineError::NonPositiveAmount);
    }
    if winners.is_empty() {
        return Err(EngineError::EmptyWinners);
    }

    let mut seen = HashSet::with_capacity(winners.len());
    for winner in winners {
        if !seen.insert(*winner) {
            error!(
                "event=divide module=division status=error error_code=duplicate_winner winners={}",
                winners.len()
            );
            return Err(EngineError::DuplicateWinner(*winner));
        }
    }
    if !seen.contains(&remainder_recipient) {
        error!(
            "event=divide module=division status=error error_code=remainder_recipient_missing winners={}",
            winners.len()
        );
        return Err(EngineError::RemainderRecipientMissing(remainder_recipient));
    }

    if winners.len() == 1 {
        return Ok(vec![PaymentShare {
            member_id: winners[0],
            amount: total_amount,
        }]);
    }

    let count = winners.len() as u64;
    let base = total_amount / count;
    let remainder = total_amount % count;

    Ok(winners
        .iter()
        .map(|member_id| PaymentShare {
            member_id: *member_id,
            amount: if *member_id == remainder_recipient {
                base + remainder
            } else {
                base
            },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::divide;
    use crate::error::EngineError;
    use uuid::Uuid;

    fn ids(count: usize) -> Vec<Uuid> {
        (0..count).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn thousand_among_three_gives_remainder_to_last() {
        let winners = ids(3);
        let shares = divide(1000, &winners, winners[2]).unwrap();
        let amounts = shares.iter().map(|share| share.amount).collect::<Vec<_>>();
        assert_eq!(amounts, vec![333, 333, 334]);
        assert_eq!(
            shares.iter().map(|share| share.member_id).collect::<Vec<_>>(),
            winners
        );
    }

    #[test]
    fn single_winner_pays_everything() {
        let winners = ids(1);
        let shares = divide(1000, &winners, winners[0]).unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].member_id, winners[0]);
        assert_eq!(shares[0].amount, 1000);
    }

    #[test]
    fn conservation_and_remainder_bound_hold() {
        for count in 1..=50usize {
            let winners = ids(count);
            for total in [1u64, 2, 7, 49, 50, 51, 99, 1000, 12_345, 999_999_937] {
                let recipient = winners[count / 2];
                let shares = divide(total, &winners, recipient).unwrap();
                assert_eq!(shares.len(), count);
                assert_eq!(shares.iter().map(|share| share.amount).sum::<u64>(), total);

                let base = total / count as u64;
                for share in &shares {
                    if share.member_id == recipient {
                        let extra = share.amount - base;
                        assert!(extra < count as u64);
                    } else {
                        assert_eq!(share.amount, base);
                    }
                }
            }
        }
    }

    #[test]
    fn amount_smaller_than_winner_count_goes_to_recipient() {
        let winners = ids(4);
        let shares = divide(3, &winners, winners[1]).unwrap();
        let amounts = shares.iter().map(|share| share.amount).collect::<Vec<_>>();
        assert_eq!(amounts, vec![0, 3, 0, 0]);
    }

    #[test]
    fn rejects_invalid_input() {
        let winners = ids(2);
        assert_eq!(
            divide(0, &winners, winners[0]).unwrap_err(),
            EngineError::NonPositiveAmount
        );
        assert_eq!(
            divide(10, &[], winners[0]).unwrap_err(),
            EngineError::EmptyWinners
        );
    }

    #[test]
    fn foreign_recipient_is_a_contract_violation() {
        let winners = ids(3);
        let outsider = Uuid::new_v4();
        let err = divide(100, &winners, outsider).unwrap_err();
        assert_eq!(err, EngineError::RemainderRecipientMissing(outsider));
        assert!(err.is_contract_violation());

        let single = ids(1);
        assert!(divide(100, &single, outsider).is_err());
    }

    #[test]
    fn duplicate_winner_is_a_contract_violation() {
        let winner = Uuid::new_v4();
        let err = divide(100, &[winner, winner], winner).unwrap_err();
        assert_eq!(err, EngineError::DuplicateWinner(winner));
        assert!(err.is_contract_violation());
    }
}
