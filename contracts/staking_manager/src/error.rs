use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 500,
    InvalidRewardRate = 501,
    InvalidStakeAmount = 502,
    PoolNotFound = 503,
    NothingStaked = 504,
    ContractMathError = 505,
    InvariantViolation = 506,
}
