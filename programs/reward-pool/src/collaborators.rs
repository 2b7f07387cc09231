//! Thin CPI wrappers for the external collaborators of core spec §6. The
//! engine treats these as opaque sibling programs reached by instruction
//! discriminator, the way `swap::pumpfun`/`swap::jupiter` call out to
//! external AMM programs elsewhere in this workspace.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::{instruction::Instruction, program::invoke_signed};

/// 8-byte Anchor instruction discriminator for `record_stake`.
const RECORD_STAKE_DISCRIMINATOR: [u8; 8] = [0x9a, 0x14, 0x2c, 0x61, 0x5d, 0x3e, 0x77, 0xb0];
/// 8-byte Anchor instruction discriminator for `record_unstake`.
const RECORD_UNSTAKE_DISCRIMINATOR: [u8; 8] = [0x47, 0xc8, 0x06, 0x2b, 0x9d, 0xf1, 0x5a, 0x23];

#[derive(AnchorSerialize, AnchorDeserialize)]
struct RecordStakeArgs {
    holder: Pubkey,
    ids: Vec<Pubkey>,
    vault_id: Pubkey,
}

/// Boost-asset Registry collaborator: `record_stake(holder, ids, vault_id)`.
/// Idempotent per `(ids, vault_id)` on the registry's side.
#[allow(clippy::too_many_arguments)]
pub fn record_boost_stake<'info>(
    registry_program: &AccountInfo<'info>,
    registry_state: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    holder: Pubkey,
    ids: Vec<Pubkey>,
    vault_id: Pubkey,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let accounts = vec![
        AccountMeta::new(registry_state.key(), false),
        AccountMeta::new_readonly(authority.key(), true),
    ];
    let mut data = RECORD_STAKE_DISCRIMINATOR.to_vec();
    RecordStakeArgs {
        holder,
        ids,
        vault_id,
    }
    .serialize(&mut data)?;

    let ix = Instruction {
        program_id: registry_program.key(),
        accounts,
        data,
    };
    invoke_signed(
        &ix,
        &[
            registry_state.clone(),
            authority.clone(),
            registry_program.clone(),
        ],
        signer_seeds,
    )?;
    Ok(())
}

/// Boost-asset Registry collaborator: `record_unstake(holder, ids, vault_id)`.
pub fn record_boost_unstake<'info>(
    registry_program: &AccountInfo<'info>,
    registry_state: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    holder: Pubkey,
    ids: Vec<Pubkey>,
    vault_id: Pubkey,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let accounts = vec![
        AccountMeta::new(registry_state.key(), false),
        AccountMeta::new_readonly(authority.key(), true),
    ];
    let mut data = RECORD_UNSTAKE_DISCRIMINATOR.to_vec();
    RecordStakeArgs {
        holder,
        ids,
        vault_id,
    }
    .serialize(&mut data)?;

    let ix = Instruction {
        program_id: registry_program.key(),
        accounts,
        data,
    };
    invoke_signed(
        &ix,
        &[
            registry_state.clone(),
            authority.clone(),
            registry_program.clone(),
        ],
        signer_seeds,
    )?;
    Ok(())
}
