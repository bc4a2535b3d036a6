// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Applies one op to the working board, recording what changed in `delta`.
fn apply_board_op(
    board: &mut Board,
    interaction: &mut InteractionController,
    op: &BoardOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        BoardOp::AddBlock { block_id, kind, payload, width, height } => {
            let block_id = block_id.clone().unwrap_or_else(|| board.next_block_id());
            placement::add_block(board, block_id.clone(), *kind, payload.clone(), *width, *height)?;
            delta.record_added(block_id);
            Ok(())
        }
        BoardOp::PlaceBlock { block } => {
            let block_id = block.id().clone();
            placement::place_block(board, block.clone())?;
            delta.record_added(block_id);
            Ok(())
        }
        BoardOp::RemoveBlock { block_id } => {
            placement::remove_block(board, block_id)?;
            if interaction.state().subject() == Some(block_id) {
                interaction.reset();
            }
            delta.record_removed(block_id.clone());
            Ok(())
        }
        BoardOp::Resize { block_id, width, height } => {
            let before = board.clone();
            let from = placement::footprint_of(&before, block_id)?;
            let outcome = placement::resize(board, block_id, *width, *height)?;
            delta.record_footprint(block_id, from, outcome.footprint);
            record_relocation(delta, &before, &outcome.pushed);
            Ok(())
        }
        BoardOp::Grow { block_id, axis } => {
            let before = board.clone();
            let from = placement::footprint_of(&before, block_id)?;
            let outcome = placement::grow(board, block_id, *axis)?;
            delta.record_footprint(block_id, from, outcome.footprint);
            record_relocation(delta, &before, &outcome.pushed);
            Ok(())
        }
        BoardOp::Shrink { block_id, edge } => {
            let from = placement::footprint_of(board, block_id)?;
            let to = placement::shrink(board, block_id, *edge)?;
            delta.record_footprint(block_id, from, to);
            Ok(())
        }
        BoardOp::Expand { block_id, direction } => {
            let from = placement::footprint_of(board, block_id)?;
            let to = placement::expand(board, block_id, *direction)?;
            delta.record_footprint(block_id, from, to);
            Ok(())
        }
        BoardOp::UpdatePayload { block_id, payload } => {
            let Some(block) = board.block_mut(block_id) else {
                return Err(PlacementError::BlockNotFound { block_id: block_id.clone() }.into());
            };
            block.set_payload(payload.clone());
            delta.record_updated(block_id);
            Ok(())
        }
        BoardOp::Interact(event) => {
            let before = board.clone();
            if let Some(relocation) = interaction.handle(board, event.clone())? {
                record_relocation(delta, &before, &relocation);
            }
            Ok(())
        }
    }
}

fn record_relocation(delta: &mut DeltaBuilder, before: &Board, moves: &[(BlockId, Footprint)]) {
    for (block_id, to) in moves {
        if let Some(from) = before.block(block_id).map(Block::footprint) {
            delta.record_footprint(block_id, from, *to);
        }
    }
}
