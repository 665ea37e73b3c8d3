use std::collections::BTreeSet;

use crate::error::Rejection;
use crate::models::{QuestConfig, RewardConfig};

pub const XP_PER_LEVEL: u32 = 500;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wallet {
    xp: u32,
    completed: BTreeSet<String>,
}

impl Wallet {
    pub fn new(xp: u32) -> Self {
        Self {
            xp,
            completed: BTreeSet::new(),
        }
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn level(&self) -> u32 {
        1 + self.xp / XP_PER_LEVEL
    }

    pub fn has_completed(&self, quest_id: &str) -> bool {
        self.completed.contains(quest_id)
    }

    /// Awards a quest's XP the first time it is completed.
    pub fn complete_quest<'a>(
        &mut self,
        quests: &'a [QuestConfig],
        quest_id: &str,
    ) -> Result<&'a QuestConfig, Rejection> {
        let quest = quests
            .iter()
            .find(|quest| quest.id == quest_id)
            .ok_or_else(|| Rejection::UnknownQuest(quest_id.to_string()))?;
        if self.completed.contains(quest_id) {
            return Err(Rejection::QuestAlreadyCompleted(quest.title.clone()));
        }
        self.completed.insert(quest.id.clone());
        self.xp = self.xp.saturating_add(quest.xp);
        Ok(quest)
    }

    /// Checks the wallet can pay for `reward` without spending anything.
    pub fn can_afford(&self, reward: &RewardConfig) -> Result<(), Rejection> {
        if self.xp < reward.cost {
            return Err(Rejection::InsufficientXp {
                reward: reward.title.clone(),
                cost: reward.cost,
                available: self.xp,
            });
        }
        Ok(())
    }

    pub fn spend(&mut self, reward: &RewardConfig) -> Result<(), Rejection> {
        self.can_afford(reward)?;
        self.xp -= reward.cost;
        Ok(())
    }
}

pub fn find_reward<'a>(rewards: &'a [RewardConfig], id: &str) -> Result<&'a RewardConfig, Rejection> {
    rewards
        .iter()
        .find(|reward| reward.id == id)
        .ok_or_else(|| Rejection::UnknownReward(id.to_string()))
}
