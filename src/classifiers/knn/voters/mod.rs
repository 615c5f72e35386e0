mod majority_voter;
mod voter;
mod weighted_distance_voter;

pub use majority_voter::MajorityVoter;
pub use voter::{LabelVote, Voter, winner};
pub use weighted_distance_voter::WeightedDistanceVoter;
