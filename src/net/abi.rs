//! Solidity interface of the deployed wave portal contract.
//!
//! Only the three methods the client calls are declared; encoding and
//! decoding come from alloy's `sol!` macro.

use alloy_sol_types::sol;

sol! {
    /// One wave as stored on chain.
    struct WaveRecord {
        address waver;
        string message;
        uint256 timestamp;
    }

    function getTotalWaves() external view returns (uint256);
    function wave(string message) external;
    function getAllWaves() external view returns (WaveRecord[] memory);
}
